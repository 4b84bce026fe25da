use collectible_registry::msg::QueryMsg as RegistryQueryMsg;
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError,
    StdResult,
};
use cw2::{get_contract_version, set_contract_version};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{Config, SaleStats, SalePool, CONFIG, POOL, STATS};

const CONTRACT_NAME: &str = "crates.io:blind-box-sale";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let validate = |address: &str| {
        deps.api
            .addr_validate(address)
            .map_err(|_| ContractError::InvalidAddress {
                address: address.to_string(),
            })
    };

    let payment_token = validate(&msg.payment_token)?;
    let collectible = validate(&msg.collectible)?;
    if payment_token == collectible {
        return Err(ContractError::InvalidAddress {
            address: collectible.to_string(),
        });
    }
    let owner = match &msg.owner {
        Some(owner) => validate(owner)?,
        None => info.sender,
    };

    if msg.unit_price.is_zero() {
        return Err(ContractError::InvalidPrice);
    }

    // Metadata indices are bounded by the registry's collection size
    let max_supply: u32 = deps
        .querier
        .query_wasm_smart(collectible.to_string(), &RegistryQueryMsg::MaxSupply {})?;
    let capacity = msg.capacity.unwrap_or(max_supply);
    if capacity == 0 || capacity > max_supply {
        return Err(ContractError::InvalidCapacity { max: max_supply });
    }

    let config = Config {
        owner,
        payment_token,
        collectible,
        unit_price: msg.unit_price,
        paused: false,
    };

    CONFIG.save(deps.storage, &config)?;
    POOL.save(deps.storage, &SalePool::new(capacity))?;
    STATS.save(deps.storage, &SaleStats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", config.owner.to_string())
        .add_attribute("payment_token", config.payment_token.to_string())
        .add_attribute("collectible", config.collectible.to_string())
        .add_attribute("unit_price", config.unit_price.to_string())
        .add_attribute("capacity", capacity.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Purchase { quantity } => {
            crate::execute::purchase::execute_purchase(deps, env, info, quantity)
        }
        ExecuteMsg::SetPrice { price } => {
            crate::execute::admin::execute_set_price(deps, info, price)
        }
        ExecuteMsg::Pause {} => crate::execute::admin::execute_set_paused(deps, info, true),
        ExecuteMsg::Unpause {} => crate::execute::admin::execute_set_paused(deps, info, false),
        ExecuteMsg::Withdraw { recipient, amount } => {
            crate::execute::withdraw::execute_withdraw(deps, env, info, recipient, amount)
        }
        ExecuteMsg::TransferOwnership { new_owner } => {
            crate::execute::admin::execute_transfer_ownership(deps, info, new_owner)
        }
        ExecuteMsg::AcceptOwnership {} => {
            crate::execute::admin::execute_accept_ownership(deps, info)
        }
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&crate::query::query_config(deps)?),
        QueryMsg::Price {} => to_json_binary(&CONFIG.load(deps.storage)?.unit_price),
        QueryMsg::Paused {} => to_json_binary(&CONFIG.load(deps.storage)?.paused),
        QueryMsg::TotalMinted {} => to_json_binary(&STATS.load(deps.storage)?.total_minted),
        QueryMsg::TotalRevenue {} => to_json_binary(&STATS.load(deps.storage)?.total_revenue),
        QueryMsg::RemainingIndices {} => to_json_binary(&POOL.load(deps.storage)?.remaining),
        QueryMsg::UserMintCount { address } => {
            to_json_binary(&crate::query::query_user_mint_count(deps, address)?)
        }
        QueryMsg::IsIndexUsed { index } => {
            to_json_binary(&crate::query::query_is_index_used(deps, index)?)
        }
        QueryMsg::AllocatedIndices { start_after, limit } => to_json_binary(
            &crate::query::query_allocated_indices(deps, start_after, limit)?,
        ),
        QueryMsg::ContractInfo {} => to_json_binary(&crate::query::query_contract_info(deps)?),
        QueryMsg::UserInfo { address } => {
            to_json_binary(&crate::query::query_user_info(deps, env, address)?)
        }
        QueryMsg::Ownership {} => to_json_binary(&crate::query::query_ownership(deps)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(StdError::generic_err(format!(
            "Cannot migrate from {} to {}",
            stored.contract, CONTRACT_NAME
        ))
        .into());
    }
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("from_version", stored.version)
        .add_attribute("to_version", CONTRACT_VERSION))
}
