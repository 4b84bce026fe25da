#[cfg(test)]
pub mod helpers {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use collectible_registry::msg::{
        BalanceResponse as NftBalanceResponse, CollectionInfoResponse,
        QueryMsg as RegistryQueryMsg,
    };
    use cosmwasm_std::testing::{
        mock_dependencies, mock_env, mock_info, MockApi, MockQuerier, MockStorage,
    };
    use cosmwasm_std::{
        from_json, to_json_binary, Addr, ContractResult, Env, OwnedDeps, Response, SystemError,
        SystemResult, Timestamp, Uint128, WasmQuery,
    };
    use cw20::{AllowanceResponse, BalanceResponse, Cw20QueryMsg, Expiration};

    use crate::contract::{execute, instantiate, query};
    use crate::error::ContractError;
    use crate::msg::*;

    pub const OWNER: &str = "owner";
    pub const PAYMENT_TOKEN: &str = "gem_token";
    pub const COLLECTIBLE: &str = "genesis_mecha";
    pub const BUYER: &str = "buyer_user";
    pub const OTHER_BUYER: &str = "other_buyer";
    pub const RANDOM_USER: &str = "random_user";
    pub const UNIT_PRICE: u128 = 100;
    pub const CAPACITY: u32 = 20;

    pub type MockDeps = OwnedDeps<MockStorage, MockApi, MockQuerier>;

    /// Snapshot of the two collaborator ledgers served to the sale's queries.
    #[derive(Default)]
    pub struct Ledgers {
        pub balances: HashMap<String, u128>,
        /// owner -> allowance granted to the sale
        pub allowances: HashMap<String, u128>,
        pub allowance_expiry: HashMap<String, Expiration>,
        pub nft_balances: HashMap<String, u64>,
        pub nft_minted: u32,
        pub nft_max_supply: u32,
    }

    pub type SharedLedgers = Arc<Mutex<Ledgers>>;

    fn smart_query(ledgers: &Ledgers, contract_addr: &str, msg: &[u8]) -> SystemResult<ContractResult<cosmwasm_std::Binary>> {
        let reply = match contract_addr {
            PAYMENT_TOKEN => match from_json::<Cw20QueryMsg>(msg) {
                Ok(Cw20QueryMsg::Balance { address }) => to_json_binary(&BalanceResponse {
                    balance: Uint128::new(*ledgers.balances.get(&address).unwrap_or(&0)),
                }),
                Ok(Cw20QueryMsg::Allowance { owner, .. }) => to_json_binary(&AllowanceResponse {
                    allowance: Uint128::new(*ledgers.allowances.get(&owner).unwrap_or(&0)),
                    expires: ledgers
                        .allowance_expiry
                        .get(&owner)
                        .cloned()
                        .unwrap_or(Expiration::Never {}),
                }),
                _ => return unsupported(contract_addr),
            },
            COLLECTIBLE => match from_json::<RegistryQueryMsg>(msg) {
                Ok(RegistryQueryMsg::MaxSupply {}) => to_json_binary(&ledgers.nft_max_supply),
                Ok(RegistryQueryMsg::TotalSupply {}) => to_json_binary(&ledgers.nft_minted),
                Ok(RegistryQueryMsg::CollectionInfo {}) => to_json_binary(&CollectionInfoResponse {
                    admin: Addr::unchecked(OWNER),
                    name: "Genesis Mecha".to_string(),
                    symbol: "GMECHA".to_string(),
                    base_uri: "ipfs://mecha/".to_string(),
                    max_supply: ledgers.nft_max_supply,
                    total_supply: ledgers.nft_minted,
                }),
                Ok(RegistryQueryMsg::Balance { owner }) => to_json_binary(&NftBalanceResponse {
                    balance: *ledgers.nft_balances.get(&owner).unwrap_or(&0),
                }),
                _ => return unsupported(contract_addr),
            },
            _ => {
                return SystemResult::Err(SystemError::NoSuchContract {
                    addr: contract_addr.to_string(),
                })
            }
        };
        SystemResult::Ok(ContractResult::from(reply))
    }

    fn unsupported(contract_addr: &str) -> SystemResult<ContractResult<cosmwasm_std::Binary>> {
        SystemResult::Err(SystemError::UnsupportedRequest {
            kind: format!("query to {}", contract_addr),
        })
    }

    pub fn install_ledgers(deps: &mut MockDeps, ledgers: SharedLedgers) {
        deps.querier.update_wasm(move |request| match request {
            WasmQuery::Smart { contract_addr, msg } => {
                let ledgers = ledgers.lock().unwrap();
                smart_query(&ledgers, contract_addr, msg.as_slice())
            }
            _ => SystemResult::Err(SystemError::UnsupportedRequest {
                kind: "raw wasm query".to_string(),
            }),
        });
    }

    pub fn default_instantiate_msg() -> InstantiateMsg {
        InstantiateMsg {
            payment_token: PAYMENT_TOKEN.to_string(),
            collectible: COLLECTIBLE.to_string(),
            unit_price: Uint128::new(UNIT_PRICE),
            owner: None,
            capacity: None,
        }
    }

    pub fn setup_contract() -> (MockDeps, Env, SharedLedgers) {
        let mut deps = mock_dependencies();
        let env = mock_env();

        let ledgers: SharedLedgers = Arc::new(Mutex::new(Ledgers {
            nft_max_supply: CAPACITY,
            ..Ledgers::default()
        }));
        install_ledgers(&mut deps, ledgers.clone());

        let info = mock_info(OWNER, &[]);
        let res = instantiate(deps.as_mut(), env.clone(), info, default_instantiate_msg()).unwrap();
        assert_eq!(res.attributes.len(), 6);

        (deps, env, ledgers)
    }

    /// Give `user` a GEM balance and an allowance to the sale.
    pub fn fund(ledgers: &SharedLedgers, user: &str, balance: u128, allowance: u128) {
        let mut ledgers = ledgers.lock().unwrap();
        ledgers.balances.insert(user.to_string(), balance);
        ledgers.allowances.insert(user.to_string(), allowance);
    }

    /// Purchase, then apply the effects the emitted sub-messages would have
    /// on the mocked ledgers.
    pub fn purchase(
        deps: &mut MockDeps,
        env: &Env,
        ledgers: &SharedLedgers,
        buyer: &str,
        quantity: u32,
    ) -> Result<Response, ContractError> {
        let info = mock_info(buyer, &[]);
        let res = execute(deps.as_mut(), env.clone(), info, ExecuteMsg::Purchase { quantity })?;

        let price = query_config(deps).unit_price.u128();
        let cost = price * u128::from(quantity);
        let mut ledgers = ledgers.lock().unwrap();
        *ledgers.balances.entry(buyer.to_string()).or_default() -= cost;
        *ledgers.allowances.entry(buyer.to_string()).or_default() -= cost;
        *ledgers
            .balances
            .entry(env.contract.address.to_string())
            .or_default() += cost;
        *ledgers.nft_balances.entry(buyer.to_string()).or_default() += u64::from(quantity);
        ledgers.nft_minted += quantity;

        Ok(res)
    }

    pub fn admin_execute(
        deps: &mut MockDeps,
        env: &Env,
        sender: &str,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        execute(deps.as_mut(), env.clone(), mock_info(sender, &[]), msg)
    }

    pub fn query_config(deps: &MockDeps) -> ConfigResponse {
        let res = query(deps.as_ref(), mock_env(), QueryMsg::Config {}).unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_contract_info(deps: &MockDeps, env: &Env) -> ContractInfoResponse {
        let res = query(deps.as_ref(), env.clone(), QueryMsg::ContractInfo {}).unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_user_info(deps: &MockDeps, env: &Env, address: &str) -> UserInfoResponse {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::UserInfo {
                address: address.to_string(),
            },
        )
        .unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_is_index_used(deps: &MockDeps, env: &Env, index: u32) -> bool {
        let res = query(deps.as_ref(), env.clone(), QueryMsg::IsIndexUsed { index }).unwrap();
        from_json(&res).unwrap()
    }

    pub fn query_allocations(deps: &MockDeps, env: &Env) -> Vec<Allocation> {
        let res = query(
            deps.as_ref(),
            env.clone(),
            QueryMsg::AllocatedIndices {
                start_after: None,
                limit: Some(100),
            },
        )
        .unwrap();
        from_json::<AllocatedIndicesResponse>(&res)
            .unwrap()
            .allocations
    }

    /// Create an env at a specific block height and time
    pub fn env_at(height: u64, secs: u64) -> Env {
        let mut env = mock_env();
        env.block.height = height;
        env.block.time = Timestamp::from_seconds(secs);
        env
    }
}
