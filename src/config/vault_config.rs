//! Per-vault trading and position parameters.

use serde::{Deserialize, Serialize};

use crate::domain::{Address, BasisPoints, FeeTier, SwapPath, TickRange};
use crate::error::ConstructionError;

/// Immutable parameters every vault deployed by a factory shares.
///
/// Describes which tokens the vault trades, through which pools, and
/// where its liquidity position sits:
///
/// - Single-hop swaps sell `input_token` for `base_asset` in the
///   `swap_fee_tier` pool.
/// - Multi-hop swaps sell `input_token` for `intermediate_token` in the
///   `first_hop_fee_tier` pool, then `intermediate_token` for
///   `base_asset` in the `second_hop_fee_tier` pool.
/// - The position pairs `token0 < token1` in the `position_fee_tier`
///   pool over `tick_range`.
/// - Exact-input swaps accept at most `max_slippage` below the output
///   the caller expected.
///
/// # Validation
///
/// - Every token is non-zero.
/// - `input_token != base_asset`, and `intermediate_token` differs
///   from both.
/// - `token0 < token1`.
/// - All fee tiers are standard; `tick_range` is aligned to the
///   position tier's spacing.
/// - `max_slippage <= 100%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultConfig {
    input_token: Address,
    base_asset: Address,
    intermediate_token: Address,
    swap_fee_tier: FeeTier,
    first_hop_fee_tier: FeeTier,
    second_hop_fee_tier: FeeTier,
    token0: Address,
    token1: Address,
    position_fee_tier: FeeTier,
    max_slippage: BasisPoints,
    // Last so TOML output places the nested table after plain values.
    tick_range: TickRange,
}

/// Builder-free argument bundle for [`VaultConfig::new`].
///
/// Field-for-field the same as [`VaultConfig`], kept public so callers
/// can spell parameters by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultConfigParams {
    /// Token sold by swaps.
    pub input_token: Address,
    /// Token bought by swaps.
    pub base_asset: Address,
    /// Middle token of the multi-hop route.
    pub intermediate_token: Address,
    /// Pool tier for single-hop swaps.
    pub swap_fee_tier: FeeTier,
    /// Pool tier for the first multi-hop leg.
    pub first_hop_fee_tier: FeeTier,
    /// Pool tier for the second multi-hop leg.
    pub second_hop_fee_tier: FeeTier,
    /// Lower-address token of the position pair.
    pub token0: Address,
    /// Higher-address token of the position pair.
    pub token1: Address,
    /// Pool tier of the position.
    pub position_fee_tier: FeeTier,
    /// Position price range.
    pub tick_range: TickRange,
    /// Largest accepted shortfall against the caller's expected output.
    pub max_slippage: BasisPoints,
}

impl VaultConfig {
    /// Creates a validated `VaultConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] if any rule in
    /// the type-level docs is violated.
    pub fn new(params: VaultConfigParams) -> Result<Self, ConstructionError> {
        let config = Self {
            input_token: params.input_token,
            base_asset: params.base_asset,
            intermediate_token: params.intermediate_token,
            swap_fee_tier: params.swap_fee_tier,
            first_hop_fee_tier: params.first_hop_fee_tier,
            second_hop_fee_tier: params.second_hop_fee_tier,
            token0: params.token0,
            token1: params.token1,
            position_fee_tier: params.position_fee_tier,
            tick_range: params.tick_range,
            max_slippage: params.max_slippage,
        };
        config.validate()?;
        Ok(config)
    }

    /// Like [`new`](Self::new), but ignores `params.tick_range` and uses
    /// the full range of the position fee tier.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] on a
    /// non-standard position fee tier or any other invalid field.
    pub fn full_range(params: VaultConfigParams) -> Result<Self, ConstructionError> {
        let tick_range = TickRange::full_range(params.position_fee_tier).map_err(|_| {
            ConstructionError::InvalidConfiguration("position fee tier is not a standard tier")
        })?;
        Self::new(VaultConfigParams {
            tick_range,
            ..params
        })
    }

    /// Validates all configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] naming the
    /// first violated rule.
    pub fn validate(&self) -> Result<(), ConstructionError> {
        let tokens = [
            self.input_token,
            self.base_asset,
            self.intermediate_token,
            self.token0,
            self.token1,
        ];
        if tokens.iter().any(Address::is_zero) {
            return Err(ConstructionError::InvalidConfiguration(
                "token addresses must be non-zero",
            ));
        }
        if self.input_token == self.base_asset {
            return Err(ConstructionError::InvalidConfiguration(
                "input token and base asset must differ",
            ));
        }
        if self.intermediate_token == self.input_token
            || self.intermediate_token == self.base_asset
        {
            return Err(ConstructionError::InvalidConfiguration(
                "intermediate token must differ from input token and base asset",
            ));
        }
        if self.token0 >= self.token1 {
            return Err(ConstructionError::InvalidConfiguration(
                "token0 must sort strictly below token1",
            ));
        }
        let tiers = [
            self.swap_fee_tier,
            self.first_hop_fee_tier,
            self.second_hop_fee_tier,
            self.position_fee_tier,
        ];
        if !tiers.iter().all(FeeTier::is_standard) {
            return Err(ConstructionError::InvalidConfiguration(
                "fee tiers must be standard tiers",
            ));
        }
        if self.tick_range.lower() >= self.tick_range.upper() {
            return Err(ConstructionError::InvalidConfiguration(
                "lower tick must be less than upper tick",
            ));
        }
        if self
            .tick_range
            .validate_for(self.position_fee_tier)
            .is_err()
        {
            return Err(ConstructionError::InvalidConfiguration(
                "tick range is not aligned to the position tick spacing",
            ));
        }
        if !self.max_slippage.is_valid_percent() {
            return Err(ConstructionError::InvalidConfiguration(
                "max slippage exceeds 100%",
            ));
        }
        Ok(())
    }

    /// Token sold by swaps.
    #[must_use]
    pub const fn input_token(&self) -> Address {
        self.input_token
    }

    /// Token bought by swaps.
    #[must_use]
    pub const fn base_asset(&self) -> Address {
        self.base_asset
    }

    /// Middle token of the multi-hop route.
    #[must_use]
    pub const fn intermediate_token(&self) -> Address {
        self.intermediate_token
    }

    /// Pool tier for single-hop swaps.
    #[must_use]
    pub const fn swap_fee_tier(&self) -> FeeTier {
        self.swap_fee_tier
    }

    /// Pool tier for the first multi-hop leg.
    #[must_use]
    pub const fn first_hop_fee_tier(&self) -> FeeTier {
        self.first_hop_fee_tier
    }

    /// Pool tier for the second multi-hop leg.
    #[must_use]
    pub const fn second_hop_fee_tier(&self) -> FeeTier {
        self.second_hop_fee_tier
    }

    /// Lower-address token of the position pair.
    #[must_use]
    pub const fn token0(&self) -> Address {
        self.token0
    }

    /// Higher-address token of the position pair.
    #[must_use]
    pub const fn token1(&self) -> Address {
        self.token1
    }

    /// Pool tier of the position.
    #[must_use]
    pub const fn position_fee_tier(&self) -> FeeTier {
        self.position_fee_tier
    }

    /// Position price range.
    #[must_use]
    pub const fn tick_range(&self) -> TickRange {
        self.tick_range
    }

    /// Largest accepted shortfall against the caller's expected output.
    #[must_use]
    pub const fn max_slippage(&self) -> BasisPoints {
        self.max_slippage
    }

    /// The multi-hop route: input → intermediate → base asset.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError::InvalidConfiguration`] if the route
    /// cannot be formed, which a validated config rules out.
    pub fn multihop_path(&self) -> Result<SwapPath, ConstructionError> {
        SwapPath::new(
            self.input_token,
            vec![
                (self.first_hop_fee_tier, self.intermediate_token),
                (self.second_hop_fee_tier, self.base_asset),
            ],
        )
        .map_err(|_| ConstructionError::InvalidConfiguration("multi-hop route is invalid"))
    }
}
