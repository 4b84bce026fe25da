use cosmwasm_std::{
    entry_point, to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Order, Response,
    StdError, StdResult,
};
use cw2::{get_contract_version, set_contract_version};
use cw_storage_plus::Bound;

use crate::error::ContractError;
use crate::msg::{
    ApprovalResponse, BalanceResponse, CollectionInfoResponse, ExecuteMsg, InstantiateMsg,
    MigrateMsg, OwnerOfResponse, QueryMsg, TokenInfoResponse, TokenUriResponse, TokensResponse,
};
use crate::state::{
    Config, TokenInfo, BALANCES, CONFIG, MINTERS, OWNED_TOKENS, TOKENS, TOTAL_SUPPLY,
};

const CONTRACT_NAME: &str = "crates.io:collectible-registry";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Upper bound of a single `MintBatch`.
pub const MAX_BATCH: u32 = 10;

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply);
    }

    let config = Config {
        admin: info.sender,
        name: msg.name,
        symbol: msg.symbol,
        base_uri: msg.base_uri,
        max_supply: msg.max_supply,
    };
    CONFIG.save(deps.storage, &config)?;
    TOTAL_SUPPLY.save(deps.storage, &0u32)?;

    let mut res = Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin.to_string())
        .add_attribute("max_supply", config.max_supply.to_string());

    if let Some(minter) = msg.minter {
        let minter = deps.api.addr_validate(&minter)?;
        MINTERS.save(deps.storage, &minter, &true)?;
        res = res.add_attribute("minter", minter.to_string());
    }

    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Mint { owner } => execute_mint(deps, info, owner, 1),
        ExecuteMsg::MintBatch { owner, amount } => execute_mint(deps, info, owner, amount),
        ExecuteMsg::SetTokenMetadata {
            token_id,
            metadata_index,
        } => execute_set_metadata(deps, info, vec![token_id], vec![metadata_index]),
        ExecuteMsg::SetTokenMetadataBatch {
            token_ids,
            metadata_indices,
        } => execute_set_metadata(deps, info, token_ids, metadata_indices),
        ExecuteMsg::SetBaseUri { base_uri } => execute_set_base_uri(deps, info, base_uri),
        ExecuteMsg::GrantMinter { address } => execute_set_minter(deps, info, address, true),
        ExecuteMsg::RevokeMinter { address } => execute_set_minter(deps, info, address, false),
        ExecuteMsg::TransferNft {
            recipient,
            token_id,
        } => execute_transfer_nft(deps, env, info, recipient, token_id),
        ExecuteMsg::Approve { spender, token_id } => {
            execute_approve(deps, info, token_id, Some(spender))
        }
        ExecuteMsg::Revoke { token_id } => execute_approve(deps, info, token_id, None),
    }
}

fn ensure_minter(deps: Deps, sender: &Addr) -> Result<(), ContractError> {
    if MINTERS.may_load(deps.storage, sender)?.unwrap_or(false) {
        Ok(())
    } else {
        Err(ContractError::NotMinter)
    }
}

fn ensure_admin(deps: Deps, sender: &Addr) -> Result<Config, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if *sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Minter: mint `amount` sequential ids. Ids start at 1 and are never reused.
fn execute_mint(
    deps: DepsMut,
    info: MessageInfo,
    owner: String,
    amount: u32,
) -> Result<Response, ContractError> {
    ensure_minter(deps.as_ref(), &info.sender)?;

    if amount == 0 || amount > MAX_BATCH {
        return Err(ContractError::InvalidAmount { max: MAX_BATCH });
    }

    let config = CONFIG.load(deps.storage)?;
    let minted = TOTAL_SUPPLY.load(deps.storage)?;
    if minted + amount > config.max_supply {
        return Err(ContractError::MaxSupplyExceeded {
            max: config.max_supply,
            minted,
            requested: amount,
        });
    }

    let owner = deps.api.addr_validate(&owner)?;
    let first_id = u64::from(minted) + 1;
    let token_ids: Vec<u64> = (first_id..first_id + u64::from(amount)).collect();

    for token_id in &token_ids {
        let token = TokenInfo {
            owner: owner.clone(),
            approved: None,
            metadata_index: None,
        };
        TOKENS.save(deps.storage, *token_id, &token)?;
        OWNED_TOKENS.save(deps.storage, (&owner, *token_id), &())?;
    }

    let balance = BALANCES.may_load(deps.storage, &owner)?.unwrap_or(0);
    BALANCES.save(deps.storage, &owner, &(balance + u64::from(amount)))?;
    TOTAL_SUPPLY.save(deps.storage, &(minted + amount))?;

    let ids = token_ids
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",");

    Ok(Response::new()
        .add_attribute("action", "mint")
        .add_attribute("minter", info.sender.to_string())
        .add_attribute("owner", owner.to_string())
        .add_attribute("token_ids", ids))
}

fn execute_set_metadata(
    deps: DepsMut,
    info: MessageInfo,
    token_ids: Vec<u64>,
    metadata_indices: Vec<u32>,
) -> Result<Response, ContractError> {
    ensure_minter(deps.as_ref(), &info.sender)?;

    if token_ids.len() != metadata_indices.len() {
        return Err(ContractError::LengthMismatch {
            ids: token_ids.len(),
            indices: metadata_indices.len(),
        });
    }

    let config = CONFIG.load(deps.storage)?;
    let mut res = Response::new().add_attribute("action", "set_token_metadata");

    for (token_id, index) in token_ids.into_iter().zip(metadata_indices) {
        if index == 0 || index > config.max_supply {
            return Err(ContractError::InvalidMetadataIndex {
                index,
                max: config.max_supply,
            });
        }
        let mut token = TOKENS
            .may_load(deps.storage, token_id)?
            .ok_or(ContractError::TokenNotFound { token_id })?;
        token.metadata_index = Some(index);
        TOKENS.save(deps.storage, token_id, &token)?;

        res = res.add_attribute(format!("token_{}", token_id), index.to_string());
    }

    Ok(res)
}

fn execute_set_base_uri(
    deps: DepsMut,
    info: MessageInfo,
    base_uri: String,
) -> Result<Response, ContractError> {
    let mut config = ensure_admin(deps.as_ref(), &info.sender)?;
    config.base_uri = base_uri;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_base_uri")
        .add_attribute("base_uri", config.base_uri))
}

fn execute_set_minter(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
    grant: bool,
) -> Result<Response, ContractError> {
    ensure_admin(deps.as_ref(), &info.sender)?;
    let address = deps.api.addr_validate(&address)?;

    if grant {
        MINTERS.save(deps.storage, &address, &true)?;
    } else {
        MINTERS.remove(deps.storage, &address);
    }

    Ok(Response::new()
        .add_attribute("action", if grant { "grant_minter" } else { "revoke_minter" })
        .add_attribute("address", address.to_string()))
}

fn execute_transfer_nft(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    recipient: String,
    token_id: u64,
) -> Result<Response, ContractError> {
    let mut token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })?;

    if token.owner != info.sender && token.approved.as_ref() != Some(&info.sender) {
        return Err(ContractError::Unauthorized);
    }

    let recipient = deps.api.addr_validate(&recipient)?;
    let previous = token.owner.clone();

    let from_balance = BALANCES.may_load(deps.storage, &previous)?.unwrap_or(0);
    BALANCES.save(deps.storage, &previous, &from_balance.saturating_sub(1))?;
    let to_balance = BALANCES.may_load(deps.storage, &recipient)?.unwrap_or(0);
    BALANCES.save(deps.storage, &recipient, &(to_balance + 1))?;

    OWNED_TOKENS.remove(deps.storage, (&previous, token_id));
    OWNED_TOKENS.save(deps.storage, (&recipient, token_id), &())?;

    token.owner = recipient.clone();
    token.approved = None;
    TOKENS.save(deps.storage, token_id, &token)?;

    Ok(Response::new()
        .add_attribute("action", "transfer_nft")
        .add_attribute("sender", info.sender.to_string())
        .add_attribute("from", previous.to_string())
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("token_id", token_id.to_string()))
}

fn execute_approve(
    deps: DepsMut,
    info: MessageInfo,
    token_id: u64,
    spender: Option<String>,
) -> Result<Response, ContractError> {
    let mut token = TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or(ContractError::TokenNotFound { token_id })?;

    if token.owner != info.sender {
        return Err(ContractError::Unauthorized);
    }

    token.approved = spender
        .map(|s| deps.api.addr_validate(&s))
        .transpose()?;
    TOKENS.save(deps.storage, token_id, &token)?;

    let spender = token
        .approved
        .as_ref()
        .map(|a| a.to_string())
        .unwrap_or_default();

    Ok(Response::new()
        .add_attribute("action", if spender.is_empty() { "revoke" } else { "approve" })
        .add_attribute("token_id", token_id.to_string())
        .add_attribute("spender", spender))
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

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::CollectionInfo {} => to_json_binary(&query_collection_info(deps)?),
        QueryMsg::MaxSupply {} => to_json_binary(&CONFIG.load(deps.storage)?.max_supply),
        QueryMsg::TotalSupply {} => to_json_binary(&TOTAL_SUPPLY.load(deps.storage)?),
        QueryMsg::RemainingSupply {} => to_json_binary(&query_remaining_supply(deps)?),
        QueryMsg::IsSoldOut {} => to_json_binary(&(query_remaining_supply(deps)? == 0)),
        QueryMsg::OwnerOf { token_id } => to_json_binary(&OwnerOfResponse {
            owner: load_token(deps, token_id)?.owner,
        }),
        QueryMsg::Balance { owner } => to_json_binary(&query_balance(deps, owner)?),
        QueryMsg::TokenUri { token_id } => to_json_binary(&TokenUriResponse {
            token_uri: token_uri(deps, token_id, &load_token(deps, token_id)?)?,
        }),
        QueryMsg::BaseUri {} => to_json_binary(&CONFIG.load(deps.storage)?.base_uri),
        QueryMsg::TokenInfo { token_id } => to_json_binary(&query_token_info(deps, token_id)?),
        QueryMsg::IsMinter { address } => {
            let addr = deps.api.addr_validate(&address)?;
            to_json_binary(&MINTERS.may_load(deps.storage, &addr)?.unwrap_or(false))
        }
        QueryMsg::Approval { token_id } => to_json_binary(&ApprovalResponse {
            spender: load_token(deps, token_id)?.approved,
        }),
        QueryMsg::Tokens {
            owner,
            start_after,
            limit,
        } => to_json_binary(&query_tokens(deps, owner, start_after, limit)?),
    }
}

fn load_token(deps: Deps, token_id: u64) -> StdResult<TokenInfo> {
    TOKENS
        .may_load(deps.storage, token_id)?
        .ok_or_else(|| StdError::not_found(format!("token {}", token_id)))
}

/// `base_uri + metadata_index + ".json"`, falling back to the token id while
/// no metadata index is bound.
fn token_uri(deps: Deps, token_id: u64, token: &TokenInfo) -> StdResult<String> {
    let config = CONFIG.load(deps.storage)?;
    let key = token
        .metadata_index
        .map(u64::from)
        .unwrap_or(token_id);
    Ok(format!("{}{}.json", config.base_uri, key))
}

fn query_collection_info(deps: Deps) -> StdResult<CollectionInfoResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(CollectionInfoResponse {
        admin: config.admin,
        name: config.name,
        symbol: config.symbol,
        base_uri: config.base_uri,
        max_supply: config.max_supply,
        total_supply: TOTAL_SUPPLY.load(deps.storage)?,
    })
}

fn query_remaining_supply(deps: Deps) -> StdResult<u32> {
    let config = CONFIG.load(deps.storage)?;
    let minted = TOTAL_SUPPLY.load(deps.storage)?;
    Ok(config.max_supply.saturating_sub(minted))
}

fn query_balance(deps: Deps, owner: String) -> StdResult<BalanceResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    Ok(BalanceResponse {
        balance: BALANCES.may_load(deps.storage, &owner)?.unwrap_or(0),
    })
}

fn query_token_info(deps: Deps, token_id: u64) -> StdResult<TokenInfoResponse> {
    let token = load_token(deps, token_id)?;
    let token_uri = token_uri(deps, token_id, &token)?;
    Ok(TokenInfoResponse {
        token_id,
        owner: token.owner,
        approved: token.approved,
        metadata_index: token.metadata_index,
        token_uri,
    })
}

fn query_tokens(
    deps: Deps,
    owner: String,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<TokensResponse> {
    let owner = deps.api.addr_validate(&owner)?;
    let limit = limit.unwrap_or(20).min(100) as usize;

    let tokens = OWNED_TOKENS
        .prefix(&owner)
        .keys(
            deps.storage,
            start_after.map(Bound::exclusive),
            None,
            Order::Ascending,
        )
        .take(limit)
        .collect::<StdResult<Vec<u64>>>()?;

    Ok(TokensResponse { tokens })
}
