use collectible_registry::msg::{
    BalanceResponse as NftBalanceResponse, CollectionInfoResponse, QueryMsg as RegistryQueryMsg,
};
use cosmwasm_std::{Deps, Env, Order, StdResult, Uint128};
use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg};
use cw_storage_plus::Bound;

use crate::msg::{
    AllocatedIndicesResponse, Allocation, ConfigResponse, ContractInfoResponse,
    OwnershipResponse, UserInfoResponse,
};
use crate::state::{ALLOCATED, CONFIG, MAX_PER_TX, PENDING_OWNER, POOL, STATS, USER_MINT_COUNT};

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    let pool = POOL.load(deps.storage)?;
    Ok(ConfigResponse {
        owner: config.owner,
        payment_token: config.payment_token,
        collectible: config.collectible,
        unit_price: config.unit_price,
        paused: config.paused,
        capacity: pool.capacity,
        max_per_tx: MAX_PER_TX,
    })
}

pub fn query_user_mint_count(deps: Deps, address: String) -> StdResult<u64> {
    let addr = deps.api.addr_validate(&address)?;
    Ok(USER_MINT_COUNT.may_load(deps.storage, &addr)?.unwrap_or(0))
}

pub fn query_is_index_used(deps: Deps, index: u32) -> StdResult<bool> {
    Ok(crate::pool::is_used(deps.storage, index))
}

pub fn query_allocated_indices(
    deps: Deps,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<AllocatedIndicesResponse> {
    let limit = limit.unwrap_or(20).min(100) as usize;

    let allocations = ALLOCATED
        .range(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .map(|item| item.map(|(index, token_id)| Allocation { index, token_id }))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(AllocatedIndicesResponse { allocations })
}

/// `remaining` is what can still be bought: the unallocated indices, capped by
/// the registry's unminted supply.
pub fn query_contract_info(deps: Deps) -> StdResult<ContractInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    let pool = POOL.load(deps.storage)?;
    let stats = STATS.load(deps.storage)?;

    let collection: CollectionInfoResponse = deps
        .querier
        .query_wasm_smart(config.collectible.to_string(), &RegistryQueryMsg::CollectionInfo {})?;
    let remaining = pool
        .remaining
        .min(collection.max_supply.saturating_sub(collection.total_supply));

    Ok(ContractInfoResponse {
        unit_price: config.unit_price,
        capacity: pool.capacity,
        remaining,
        total_minted: stats.total_minted,
        total_revenue: stats.total_revenue,
        sold_out: remaining == 0,
        paused: config.paused,
    })
}

pub fn query_user_info(deps: Deps, env: Env, address: String) -> StdResult<UserInfoResponse> {
    let addr = deps.api.addr_validate(&address)?;
    let config = CONFIG.load(deps.storage)?;

    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        config.payment_token.to_string(),
        &Cw20QueryMsg::Balance {
            address: addr.to_string(),
        },
    )?;
    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        config.payment_token.to_string(),
        &Cw20QueryMsg::Allowance {
            owner: addr.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;
    let nfts: NftBalanceResponse = deps.querier.query_wasm_smart(
        config.collectible.to_string(),
        &RegistryQueryMsg::Balance {
            owner: addr.to_string(),
        },
    )?;

    let payment_allowance = if allowance.expires.is_expired(&env.block) {
        Uint128::zero()
    } else {
        allowance.allowance
    };

    Ok(UserInfoResponse {
        payment_balance: balance.balance,
        payment_allowance,
        nft_balance: nfts.balance,
        mint_count: USER_MINT_COUNT.may_load(deps.storage, &addr)?.unwrap_or(0),
    })
}

pub fn query_ownership(deps: Deps) -> StdResult<OwnershipResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(OwnershipResponse {
        owner: config.owner,
        pending_owner: PENDING_OWNER.may_load(deps.storage)?,
    })
}
