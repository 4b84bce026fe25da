use cosmwasm_std::{
    entry_point, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult, Uint128,
};
use cw2::{get_contract_version, set_contract_version};
use cw20::{Cw20Coin, MinterResponse};
use cw20_base::state::{BALANCES, TOKEN_INFO};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};

const CONTRACT_NAME: &str = "crates.io:payment-token";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");
const MAX_DECIMALS: u8 = 18;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    if msg.decimals > MAX_DECIMALS {
        return Err(ContractError::InvalidDecimals {
            max: MAX_DECIMALS,
            got: msg.decimals,
        });
    }

    let owner = match msg.owner {
        Some(owner) => deps.api.addr_validate(&owner)?,
        None => info.sender.clone(),
    };

    let initial_balances = if msg.initial_supply.is_zero() {
        vec![]
    } else {
        vec![Cw20Coin {
            address: owner.to_string(),
            amount: msg.initial_supply,
        }]
    };

    let base_msg = cw20_base::msg::InstantiateMsg {
        name: msg.name,
        symbol: msg.symbol,
        decimals: msg.decimals,
        initial_balances,
        mint: Some(MinterResponse {
            minter: owner.to_string(),
            cap: msg.cap,
        }),
        marketing: None,
    };

    cw20_base::contract::instantiate(deps.branch(), env, info, base_msg)?;

    // cw20-base records its own name; ours wins so migrations can check it
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", owner.to_string())
        .add_attribute("initial_supply", msg.initial_supply.to_string()))
}

/// Burning is reserved to the owner (the current minter): `Burn` burns its
/// own tokens, `BurnFrom` burns from any account without an allowance.
/// Everything else is served by cw20-base unchanged.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Burn { amount } => {
            ensure_owner(deps.as_ref(), &info)?;
            Ok(cw20_base::contract::execute(
                deps,
                env,
                info,
                ExecuteMsg::Burn { amount },
            )?)
        }
        ExecuteMsg::BurnFrom { owner, amount } => execute_owner_burn(deps, info, owner, amount),
        msg => Ok(cw20_base::contract::execute(deps, env, info, msg)?),
    }
}

fn ensure_owner(deps: Deps, info: &MessageInfo) -> Result<(), ContractError> {
    let token = TOKEN_INFO.load(deps.storage)?;
    match token.mint {
        Some(minter) if minter.minter == info.sender => Ok(()),
        _ => Err(ContractError::Unauthorized),
    }
}

fn execute_owner_burn(
    deps: DepsMut,
    info: MessageInfo,
    from: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    ensure_owner(deps.as_ref(), &info)?;
    if amount.is_zero() {
        return Err(cw20_base::ContractError::InvalidZeroAmount {}.into());
    }

    let from = deps.api.addr_validate(&from)?;
    let balance = BALANCES.may_load(deps.storage, &from)?.unwrap_or_default();
    if balance < amount {
        return Err(ContractError::BurnExceedsBalance {
            balance: balance.to_string(),
            amount: amount.to_string(),
        });
    }

    BALANCES.save(deps.storage, &from, &(balance - amount))?;
    TOKEN_INFO.update(deps.storage, |mut token| -> StdResult<_> {
        token.total_supply = token.total_supply.checked_sub(amount)?;
        Ok(token)
    })?;

    Ok(Response::new()
        .add_attribute("action", "burn_from")
        .add_attribute("from", from.to_string())
        .add_attribute("by", info.sender.to_string())
        .add_attribute("amount", amount.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    cw20_base::contract::query(deps, env, msg)
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
