use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::{Config, CONFIG, PENDING_OWNER};

pub fn ensure_owner(config: &Config, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != config.owner {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

/// Owner-only: replace the unit price. Applies to every later purchase.
pub fn execute_set_price(
    deps: DepsMut,
    info: MessageInfo,
    price: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    if price.is_zero() {
        return Err(ContractError::InvalidPrice);
    }

    let old_price = config.unit_price;
    config.unit_price = price;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "blind_box.set_price")
        .add_attribute("old_price", old_price.to_string())
        .add_attribute("new_price", price.to_string()))
}

/// Owner-only: pause or resume purchases. Queries keep working while paused.
pub fn execute_set_paused(
    deps: DepsMut,
    info: MessageInfo,
    paused: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    config.paused = paused;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute(
            "action",
            if paused {
                "blind_box.pause"
            } else {
                "blind_box.unpause"
            },
        )
        .add_attribute("owner", info.sender.to_string()))
}

pub fn execute_transfer_ownership(
    deps: DepsMut,
    info: MessageInfo,
    new_owner: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let pending = deps
        .api
        .addr_validate(&new_owner)
        .map_err(|_| ContractError::InvalidAddress { address: new_owner })?;
    PENDING_OWNER.save(deps.storage, &pending)?;

    Ok(Response::new()
        .add_attribute("action", "blind_box.transfer_ownership")
        .add_attribute("owner", config.owner.to_string())
        .add_attribute("pending_owner", pending.to_string()))
}

pub fn execute_accept_ownership(
    deps: DepsMut,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    let pending = PENDING_OWNER
        .may_load(deps.storage)?
        .ok_or(ContractError::NoPendingOwner)?;
    if info.sender != pending {
        return Err(ContractError::Unauthorized);
    }

    let mut config = CONFIG.load(deps.storage)?;
    let previous = config.owner;
    config.owner = pending;
    CONFIG.save(deps.storage, &config)?;
    PENDING_OWNER.remove(deps.storage);

    Ok(Response::new()
        .add_attribute("action", "blind_box.accept_ownership")
        .add_attribute("previous_owner", previous.to_string())
        .add_attribute("owner", config.owner.to_string()))
}
