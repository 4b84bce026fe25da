use cosmwasm_std::{to_json_binary, CosmosMsg, DepsMut, Env, MessageInfo, Response, Uint128, WasmMsg};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;
use crate::execute::admin::ensure_owner;
use crate::state::CONFIG;

/// Owner-only: send collected GEM to `recipient`.
/// `amount == 0` withdraws the entire balance held by the sale.
/// Lifetime revenue is left untouched.
pub fn execute_withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    recipient: String,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    ensure_owner(&config, &info)?;

    let to = deps
        .api
        .addr_validate(&recipient)
        .map_err(|_| ContractError::InvalidAddress { address: recipient })?;

    // Query the CW20 balance held by this contract
    let holdings: BalanceResponse = deps.querier.query_wasm_smart(
        config.payment_token.to_string(),
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;

    let withdraw_amount = if amount.is_zero() {
        holdings.balance
    } else {
        amount
    };

    if withdraw_amount.is_zero() || withdraw_amount > holdings.balance {
        return Err(ContractError::InsufficientBalance {
            need: withdraw_amount.to_string(),
            have: holdings.balance.to_string(),
        });
    }

    let transfer_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: to.to_string(),
            amount: withdraw_amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer_msg)
        .add_attribute("action", "blind_box.withdraw")
        .add_attribute("recipient", to.to_string())
        .add_attribute("amount", withdraw_amount.to_string())
        .add_attribute("contract_balance", holdings.balance.to_string()))
}
