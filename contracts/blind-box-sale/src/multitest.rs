//! End-to-end purchases against real GEM and registry contracts.

use collectible_registry::msg::{
    ExecuteMsg as RegistryExecuteMsg, InstantiateMsg as RegistryInstantiateMsg, OwnerOfResponse,
    QueryMsg as RegistryQueryMsg, TokenInfoResponse, TokenUriResponse,
};
use cosmwasm_std::{Addr, Uint128};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Expiration};
use cw_multi_test::{App, ContractWrapper, Executor};

use crate::error::ContractError;
use crate::msg::{ContractInfoResponse, ExecuteMsg, InstantiateMsg, QueryMsg};

const OWNER: &str = "owner";
const BUYER: &str = "buyer";
const TREASURY: &str = "treasury";

struct Suite {
    app: App,
    gem: Addr,
    registry: Addr,
    sale: Addr,
}

impl Suite {
    /// Deploy GEM, the registry and the sale. The sale is only made a minter
    /// when `grant_minter` is set.
    fn new(grant_minter: bool) -> Self {
        let mut app = App::default();
        let owner = Addr::unchecked(OWNER);

        let gem_code = app.store_code(Box::new(ContractWrapper::new(
            payment_token::contract::execute,
            payment_token::contract::instantiate,
            payment_token::contract::query,
        )));
        let registry_code = app.store_code(Box::new(ContractWrapper::new(
            collectible_registry::contract::execute,
            collectible_registry::contract::instantiate,
            collectible_registry::contract::query,
        )));
        let sale_code = app.store_code(Box::new(ContractWrapper::new(
            crate::contract::execute,
            crate::contract::instantiate,
            crate::contract::query,
        )));

        let gem = app
            .instantiate_contract(
                gem_code,
                owner.clone(),
                &payment_token::msg::InstantiateMsg::default(),
                &[],
                "gem",
                None,
            )
            .unwrap();

        let registry = app
            .instantiate_contract(
                registry_code,
                owner.clone(),
                &RegistryInstantiateMsg {
                    name: "Genesis Mecha".to_string(),
                    symbol: "GMECHA".to_string(),
                    base_uri: "ipfs://mecha/".to_string(),
                    max_supply: 20,
                    minter: None,
                },
                &[],
                "genesis-mecha",
                None,
            )
            .unwrap();

        let sale = app
            .instantiate_contract(
                sale_code,
                owner.clone(),
                &InstantiateMsg {
                    payment_token: gem.to_string(),
                    collectible: registry.to_string(),
                    unit_price: Uint128::new(100),
                    owner: None,
                    capacity: None,
                },
                &[],
                "blind-box-sale",
                None,
            )
            .unwrap();

        if grant_minter {
            app.execute_contract(
                owner.clone(),
                registry.clone(),
                &RegistryExecuteMsg::GrantMinter {
                    address: sale.to_string(),
                },
                &[],
            )
            .unwrap();
        }

        // Seed the buyer with GEM and approve the sale
        app.execute_contract(
            owner,
            gem.clone(),
            &Cw20ExecuteMsg::Transfer {
                recipient: BUYER.to_string(),
                amount: Uint128::new(1_000),
            },
            &[],
        )
        .unwrap();
        app.execute_contract(
            Addr::unchecked(BUYER),
            gem.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: sale.to_string(),
                amount: Uint128::new(1_000),
                expires: None,
            },
            &[],
        )
        .unwrap();

        Suite {
            app,
            gem,
            registry,
            sale,
        }
    }

    fn gem_balance(&self, address: &str) -> Uint128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                self.gem.clone(),
                &Cw20QueryMsg::Balance {
                    address: address.to_string(),
                },
            )
            .unwrap();
        res.balance
    }

    fn contract_info(&self) -> ContractInfoResponse {
        self.app
            .wrap()
            .query_wasm_smart(self.sale.clone(), &QueryMsg::ContractInfo {})
            .unwrap()
    }

    fn purchase(&mut self, quantity: u32) -> anyhow::Result<cw_multi_test::AppResponse> {
        self.app.execute_contract(
            Addr::unchecked(BUYER),
            self.sale.clone(),
            &ExecuteMsg::Purchase { quantity },
            &[],
        )
    }
}

#[test]
fn purchase_moves_gem_and_mints_indexed_tokens() {
    let mut suite = Suite::new(true);

    let res = suite.purchase(3).unwrap();
    assert!(res.has_event(
        &cosmwasm_std::Event::new("wasm-blind_box.batch_minted").add_attribute("quantity", "3")
    ));

    assert_eq!(suite.gem_balance(BUYER), Uint128::new(700));
    assert_eq!(suite.gem_balance(suite.sale.as_str()), Uint128::new(300));

    let info = suite.contract_info();
    assert_eq!(info.total_minted, 3);
    assert_eq!(info.total_revenue, Uint128::new(300));
    assert_eq!(info.remaining, 17);

    for token_id in 1..=3u64 {
        let owner: OwnerOfResponse = suite
            .app
            .wrap()
            .query_wasm_smart(suite.registry.clone(), &RegistryQueryMsg::OwnerOf { token_id })
            .unwrap();
        assert_eq!(owner.owner, Addr::unchecked(BUYER));

        let token: TokenInfoResponse = suite
            .app
            .wrap()
            .query_wasm_smart(suite.registry.clone(), &RegistryQueryMsg::TokenInfo { token_id })
            .unwrap();
        let index = token.metadata_index.unwrap();
        assert!((1..=20).contains(&index));

        let uri: TokenUriResponse = suite
            .app
            .wrap()
            .query_wasm_smart(suite.registry.clone(), &RegistryQueryMsg::TokenUri { token_id })
            .unwrap();
        assert_eq!(uri.token_uri, format!("ipfs://mecha/{}.json", index));

        let used: bool = suite
            .app
            .wrap()
            .query_wasm_smart(suite.sale.clone(), &QueryMsg::IsIndexUsed { index })
            .unwrap();
        assert!(used);
    }
}

#[test]
fn withdraw_sends_holdings_and_keeps_revenue() {
    let mut suite = Suite::new(true);
    suite.purchase(3).unwrap();

    suite
        .app
        .execute_contract(
            Addr::unchecked(OWNER),
            suite.sale.clone(),
            &ExecuteMsg::Withdraw {
                recipient: TREASURY.to_string(),
                amount: Uint128::zero(),
            },
            &[],
        )
        .unwrap();

    assert_eq!(suite.gem_balance(TREASURY), Uint128::new(300));
    assert_eq!(suite.gem_balance(suite.sale.as_str()), Uint128::zero());
    assert_eq!(suite.contract_info().total_revenue, Uint128::new(300));

    let err = suite
        .app
        .execute_contract(
            Addr::unchecked(OWNER),
            suite.sale.clone(),
            &ExecuteMsg::Withdraw {
                recipient: TREASURY.to_string(),
                amount: Uint128::zero(),
            },
            &[],
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContractError>(),
        Some(ContractError::InsufficientBalance { .. })
    ));
}

#[test]
fn failed_mint_reverts_payment() {
    // Sale was never granted the minter role
    let mut suite = Suite::new(false);

    suite.purchase(2).unwrap_err();

    assert_eq!(suite.gem_balance(BUYER), Uint128::new(1_000));
    assert_eq!(suite.gem_balance(suite.sale.as_str()), Uint128::zero());

    let info = suite.contract_info();
    assert_eq!(info.total_minted, 0);
    assert_eq!(info.total_revenue, Uint128::zero());
    assert_eq!(info.remaining, 20);

    let supply: u32 = suite
        .app
        .wrap()
        .query_wasm_smart(suite.registry.clone(), &RegistryQueryMsg::TotalSupply {})
        .unwrap();
    assert_eq!(supply, 0);
}

#[test]
fn rejected_purchase_leaves_balances() {
    let mut suite = Suite::new(true);

    // 11 boxes exceeds the per-transaction limit
    let err = suite.purchase(11).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InvalidAmount { max: 10 })
    );

    // 1_000 GEM buys 10 boxes; the 11th is unaffordable
    suite.purchase(10).unwrap();
    let err = suite.purchase(1).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ContractError>(),
        Some(ContractError::InsufficientBalance { .. })
    ));

    assert_eq!(suite.gem_balance(BUYER), Uint128::zero());
    assert_eq!(suite.contract_info().total_minted, 10);
}

#[test]
fn expired_allowance_is_rejected_before_transfer() {
    let mut suite = Suite::new(true);
    let expiry = suite.app.block_info().height + 1;

    suite
        .app
        .execute_contract(
            Addr::unchecked(BUYER),
            suite.gem.clone(),
            &Cw20ExecuteMsg::IncreaseAllowance {
                spender: suite.sale.to_string(),
                amount: Uint128::new(1),
                expires: Some(Expiration::AtHeight(expiry)),
            },
            &[],
        )
        .unwrap();
    suite.app.update_block(|block| block.height += 5);

    let err = suite.purchase(1).unwrap_err();
    assert_eq!(
        err.downcast_ref::<ContractError>(),
        Some(&ContractError::InsufficientAllowance {
            need: "100".to_string(),
            have: "0".to_string(),
        })
    );
    assert_eq!(suite.gem_balance(BUYER), Uint128::new(1_000));
    assert_eq!(suite.contract_info().total_minted, 0);
}
