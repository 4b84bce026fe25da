use collectible_registry::msg::{
    CollectionInfoResponse, ExecuteMsg as RegistryExecuteMsg, QueryMsg as RegistryQueryMsg,
};
use cosmwasm_std::{
    to_json_binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, Uint128, WasmMsg,
};
use cw20::{AllowanceResponse, BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg};

use crate::error::ContractError;
use crate::pool;
use crate::state::{ALLOCATED, CONFIG, MAX_PER_TX, POOL, STATS, USER_MINT_COUNT};

fn join<T: ToString>(items: &[T]) -> String {
    items
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Buy `quantity` boxes: pull `unit_price * quantity` GEM from the buyer,
/// mint that many NFTs to them and bind each to a fresh metadata index.
///
/// All checks run before any message is emitted; the CW20 pull and the mints
/// are sub-messages of the same transaction, so a failure anywhere reverts
/// the whole purchase.
pub fn execute_purchase(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;

    if config.paused {
        return Err(ContractError::OperationPaused);
    }

    if quantity == 0 || quantity > MAX_PER_TX {
        return Err(ContractError::InvalidAmount { max: MAX_PER_TX });
    }

    // Pool and registry must both have room
    let mut sale_pool = POOL.load(deps.storage)?;
    let collection: CollectionInfoResponse = deps
        .querier
        .query_wasm_smart(config.collectible.to_string(), &RegistryQueryMsg::CollectionInfo {})?;
    let registry_remaining = collection
        .max_supply
        .saturating_sub(collection.total_supply);
    let available = sale_pool.remaining.min(registry_remaining);
    if available < quantity {
        return Err(ContractError::SupplyExhausted {
            remaining: available,
            requested: quantity,
        });
    }

    let total_price = config.unit_price.checked_mul(Uint128::from(quantity))?;

    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        config.payment_token.to_string(),
        &Cw20QueryMsg::Balance {
            address: info.sender.to_string(),
        },
    )?;
    if balance.balance < total_price {
        return Err(ContractError::InsufficientBalance {
            need: total_price.to_string(),
            have: balance.balance.to_string(),
        });
    }

    let allowance: AllowanceResponse = deps.querier.query_wasm_smart(
        config.payment_token.to_string(),
        &Cw20QueryMsg::Allowance {
            owner: info.sender.to_string(),
            spender: env.contract.address.to_string(),
        },
    )?;
    // cw20-base still reports the stored amount once an allowance has expired
    let approved = if allowance.expires.is_expired(&env.block) {
        Uint128::zero()
    } else {
        allowance.allowance
    };
    if approved < total_price {
        return Err(ContractError::InsufficientAllowance {
            need: total_price.to_string(),
            have: approved.to_string(),
        });
    }

    // Registry ids are sequential from 1 and never burned
    let first_token_id = u64::from(collection.total_supply) + 1;

    let mut stats = STATS.load(deps.storage)?;
    let seed = pool::purchase_seed(&env, &info.sender, stats.total_minted);
    let timestamp = env.block.time.seconds().to_string();

    let mut token_ids = Vec::with_capacity(quantity as usize);
    let mut indices = Vec::with_capacity(quantity as usize);
    let mut events = Vec::with_capacity(quantity as usize + 1);

    for ordinal in 0..quantity {
        let index = pool::draw(deps.storage, &mut sale_pool, &seed, ordinal)?;
        let token_id = first_token_id + u64::from(ordinal);
        ALLOCATED.save(deps.storage, index, &token_id)?;

        events.push(
            Event::new("blind_box.minted")
                .add_attribute("buyer", info.sender.to_string())
                .add_attribute("token_id", token_id.to_string())
                .add_attribute("metadata_index", index.to_string())
                .add_attribute("price", config.unit_price.to_string())
                .add_attribute("timestamp", timestamp.clone()),
        );
        token_ids.push(token_id);
        indices.push(index);
    }

    if quantity > 1 {
        events.push(
            Event::new("blind_box.batch_minted")
                .add_attribute("buyer", info.sender.to_string())
                .add_attribute("token_ids", join(&token_ids))
                .add_attribute("quantity", quantity.to_string())
                .add_attribute("total_price", total_price.to_string())
                .add_attribute("timestamp", timestamp),
        );
    }

    POOL.save(deps.storage, &sale_pool)?;

    stats.total_minted += u64::from(quantity);
    stats.total_revenue = stats.total_revenue.checked_add(total_price)?;
    STATS.save(deps.storage, &stats)?;

    let user_count = USER_MINT_COUNT
        .may_load(deps.storage, &info.sender)?
        .unwrap_or(0);
    USER_MINT_COUNT.save(deps.storage, &info.sender, &(user_count + u64::from(quantity)))?;

    // Pull payment first; the mints follow in the same transaction
    let payment_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.payment_token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: info.sender.to_string(),
            recipient: env.contract.address.to_string(),
            amount: total_price,
        })?,
        funds: vec![],
    });

    let mint_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.collectible.to_string(),
        msg: to_json_binary(&RegistryExecuteMsg::MintBatch {
            owner: info.sender.to_string(),
            amount: quantity,
        })?,
        funds: vec![],
    });

    let metadata_msg = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: config.collectible.to_string(),
        msg: to_json_binary(&RegistryExecuteMsg::SetTokenMetadataBatch {
            token_ids: token_ids.clone(),
            metadata_indices: indices.clone(),
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(payment_msg)
        .add_message(mint_msg)
        .add_message(metadata_msg)
        .add_events(events)
        .add_attribute("action", "blind_box.purchase")
        .add_attribute("buyer", info.sender.to_string())
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("total_price", total_price.to_string())
        .add_attribute("token_ids", join(&token_ids))
        .add_attribute("metadata_indices", join(&indices))
        .add_attribute("seed", hex::encode(seed))
        .add_attribute("remaining", sale_pool.remaining.to_string()))
}
