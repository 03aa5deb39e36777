use soroban_sdk::{contracttype, Address, Symbol};

use crate::storage_types::CampaignId;

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign_id: CampaignId,
    pub fundraiser: Address,
    pub goal: i128,
    pub target_block_height: u32,
}

#[contracttype]
#[derive(Clone)]
pub struct InvestmentMadeEvent {
    pub campaign_id: CampaignId,
    pub investor: Address,
    pub amount: i128,
    pub target_reached: bool,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsCollectedEvent {
    pub campaign_id: CampaignId,
    pub fundraiser: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct InvestmentRefundedEvent {
    pub campaign_id: CampaignId,
    pub investor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignUpdatedEvent {
    pub campaign_id: CampaignId,
    pub fundraiser: Address,
}

pub fn emit_campaign_created(env: &soroban_sdk::Env, event: CampaignCreatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_created"),),
        event,
    );
}

pub fn emit_investment_made(env: &soroban_sdk::Env, event: InvestmentMadeEvent) {
    env.events().publish(
        (Symbol::new(env, "investment_made"),),
        event,
    );
}

pub fn emit_funds_collected(env: &soroban_sdk::Env, event: FundsCollectedEvent) {
    env.events().publish(
        (Symbol::new(env, "funds_collected"),),
        event,
    );
}

pub fn emit_investment_refunded(env: &soroban_sdk::Env, event: InvestmentRefundedEvent) {
    env.events().publish(
        (Symbol::new(env, "investment_refunded"),),
        event,
    );
}

pub fn emit_campaign_updated(env: &soroban_sdk::Env, event: CampaignUpdatedEvent) {
    env.events().publish(
        (Symbol::new(env, "campaign_updated"),),
        event,
    );
}
