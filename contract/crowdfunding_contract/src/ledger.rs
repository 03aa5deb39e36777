use soroban_sdk::{token, Address, Env};

use crate::storage_types::DataKey;

fn token_address(env: &Env) -> Address {
    env.storage().instance().get(&DataKey::Token).unwrap()
}

/// Spendable token balance of an account, checked before any transfer so
/// an underfunded invest call fails with a contract error instead of a
/// host trap.
pub fn spendable_balance(env: &Env, who: &Address) -> i128 {
    let token_client = token::TokenClient::new(env, &token_address(env));
    token_client.balance(who)
}

/// Move an investment from the investor into the contract-held escrow.
pub fn deposit_to_escrow(env: &Env, from: &Address, amount: i128) {
    let token_client = token::TokenClient::new(env, &token_address(env));
    token_client.transfer(from, &env.current_contract_address(), &amount);
}

/// Pay out from the contract-held escrow (collect and refund paths).
pub fn pay_out_escrow(env: &Env, to: &Address, amount: i128) {
    let token_client = token::TokenClient::new(env, &token_address(env));
    token_client.transfer(&env.current_contract_address(), to, &amount);
}
