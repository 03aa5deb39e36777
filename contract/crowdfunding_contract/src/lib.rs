#![no_std]

mod events;
mod ledger;
mod storage_types;


use soroban_sdk::{contract, contractimpl, Address, Env, String};

use storage_types::{
    Campaign, CampaignId, CampaignInformation, CampaignStatus, CampaignTotals, DataKey, Error,
    PersistentKey, TTL_INSTANCE, TTL_PERSISTENT,
};

#[contract]
pub struct CrowdfundingContract;

#[contractimpl]
impl CrowdfundingContract {
    /// Initialize the contract with the token used for all investments.
    pub fn initialize(env: Env, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Token) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::CampaignIdNonce, &0u64);
        env.storage().instance().set(&DataKey::TotalInvestments, &0u64);
        env.storage().instance().set(&DataKey::TotalInvestmentValue, &0i128);

        extend_instance(&env);

        Ok(())
    }

    /// Create a new campaign. Ids are assigned sequentially starting at 1;
    /// the funding deadline is `duration` blocks from now.
    pub fn create_campaign(
        env: Env,
        fundraiser: Address,
        name: String,
        description: String,
        link: String,
        goal: i128,
        duration: u32,
    ) -> Result<CampaignId, Error> {
        fundraiser.require_auth();

        let nonce: u64 = env.storage().instance().get(&DataKey::CampaignIdNonce).unwrap_or(0);
        let campaign_id = nonce + 1;
        let target_block_height = env.ledger().sequence().saturating_add(duration);

        let campaign = Campaign {
            name,
            fundraiser: fundraiser.clone(),
            goal,
            target_block_height,
        };
        let information = CampaignInformation { description, link };
        let totals = CampaignTotals {
            total_investment: 0,
            total_investors: 0,
        };
        let status = CampaignStatus {
            target_reached: false,
            target_reached_height: 0,
            funded: false,
        };

        env.storage().persistent().set(&PersistentKey::Campaign(campaign_id), &campaign);
        env.storage().persistent().set(&PersistentKey::CampaignInformation(campaign_id), &information);
        env.storage().persistent().set(&PersistentKey::CampaignTotals(campaign_id), &totals);
        env.storage().persistent().set(&PersistentKey::CampaignStatus(campaign_id), &status);
        env.storage().instance().set(&DataKey::CampaignIdNonce, &campaign_id);

        extend_persistent(&env, &PersistentKey::Campaign(campaign_id));
        extend_persistent(&env, &PersistentKey::CampaignInformation(campaign_id));
        extend_persistent(&env, &PersistentKey::CampaignTotals(campaign_id));
        extend_persistent(&env, &PersistentKey::CampaignStatus(campaign_id));
        extend_instance(&env);

        events::emit_campaign_created(
            &env,
            events::CampaignCreatedEvent {
                campaign_id,
                fundraiser,
                goal,
                target_block_height,
            },
        );

        Ok(campaign_id)
    }

    /// Invest into a campaign's escrow. Repeat investments by the same
    /// investor accumulate into a single record.
    pub fn invest(
        env: Env,
        investor: Address,
        campaign_id: CampaignId,
        amount: i128,
    ) -> Result<bool, Error> {
        investor.require_auth();

        let campaign = load_campaign(&env, campaign_id)?;

        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let mut status = load_status(&env, campaign_id);
        if status.funded {
            // The escrow has already been paid out; a late investment
            // would have no refund or collect path left.
            return Err(Error::AlreadyFunded);
        }

        if ledger::spendable_balance(&env, &investor) < amount {
            return Err(Error::InsufficientBalance);
        }
        ledger::deposit_to_escrow(&env, &investor, amount);

        let investment_key = PersistentKey::Investment(campaign_id, investor.clone());
        let invested: i128 = env.storage().persistent().get(&investment_key).unwrap_or(0);

        let mut totals = load_totals(&env, campaign_id);
        if invested == 0 {
            totals.total_investors += 1;
        }
        totals.total_investment += amount;

        env.storage().persistent().set(&investment_key, &(invested + amount));
        env.storage().persistent().set(&PersistentKey::CampaignTotals(campaign_id), &totals);

        if !status.target_reached && totals.total_investment >= campaign.goal {
            status.target_reached = true;
            status.target_reached_height = env.ledger().sequence();
            env.storage().persistent().set(&PersistentKey::CampaignStatus(campaign_id), &status);
            extend_persistent(&env, &PersistentKey::CampaignStatus(campaign_id));
        }

        // Global aggregates count invest transactions, not unique investors
        let total_investments: u64 = env.storage().instance().get(&DataKey::TotalInvestments).unwrap_or(0);
        let total_value: i128 = env.storage().instance().get(&DataKey::TotalInvestmentValue).unwrap_or(0);
        env.storage().instance().set(&DataKey::TotalInvestments, &(total_investments + 1));
        env.storage().instance().set(&DataKey::TotalInvestmentValue, &(total_value + amount));

        extend_persistent(&env, &investment_key);
        extend_persistent(&env, &PersistentKey::CampaignTotals(campaign_id));
        extend_instance(&env);

        events::emit_investment_made(
            &env,
            events::InvestmentMadeEvent {
                campaign_id,
                investor,
                amount,
                target_reached: status.target_reached,
            },
        );

        Ok(true)
    }

    /// Transfer the escrowed investments to the fundraiser once the goal
    /// has been reached. Not re-callable: the escrow holds other campaigns'
    /// funds too, so a second collect would overdraw.
    pub fn collect(env: Env, fundraiser: Address, campaign_id: CampaignId) -> Result<bool, Error> {
        fundraiser.require_auth();

        let campaign = load_campaign(&env, campaign_id)?;
        if campaign.fundraiser != fundraiser {
            return Err(Error::NotOwner);
        }

        let mut status = load_status(&env, campaign_id);
        if !status.target_reached {
            return Err(Error::TargetNotReached);
        }
        if status.funded {
            return Err(Error::AlreadyFunded);
        }

        let totals = load_totals(&env, campaign_id);
        ledger::pay_out_escrow(&env, &fundraiser, totals.total_investment);

        status.funded = true;
        env.storage().persistent().set(&PersistentKey::CampaignStatus(campaign_id), &status);
        extend_persistent(&env, &PersistentKey::CampaignStatus(campaign_id));

        events::emit_funds_collected(
            &env,
            events::FundsCollectedEvent {
                campaign_id,
                fundraiser,
                amount: totals.total_investment,
            },
        );

        Ok(true)
    }

    /// Return the caller's full investment from escrow. Allowed after the
    /// target is reached (the reached flag stays set), rejected once the
    /// campaign is funded because the escrow no longer holds the amount.
    pub fn refund(env: Env, investor: Address, campaign_id: CampaignId) -> Result<bool, Error> {
        investor.require_auth();

        load_campaign(&env, campaign_id)?;

        let status = load_status(&env, campaign_id);
        if status.funded {
            return Err(Error::AlreadyFunded);
        }

        let investment_key = PersistentKey::Investment(campaign_id, investor.clone());
        let invested: i128 = env.storage().persistent().get(&investment_key).unwrap_or(0);
        if invested == 0 {
            return Err(Error::NoInvestment);
        }

        ledger::pay_out_escrow(&env, &investor, invested);

        let mut totals = load_totals(&env, campaign_id);
        totals.total_investment -= invested;
        totals.total_investors -= 1;

        env.storage().persistent().set(&investment_key, &0i128);
        env.storage().persistent().set(&PersistentKey::CampaignTotals(campaign_id), &totals);

        let total_investments: u64 = env.storage().instance().get(&DataKey::TotalInvestments).unwrap_or(0);
        let total_value: i128 = env.storage().instance().get(&DataKey::TotalInvestmentValue).unwrap_or(0);
        env.storage().instance().set(&DataKey::TotalInvestments, &(total_investments - 1));
        env.storage().instance().set(&DataKey::TotalInvestmentValue, &(total_value - invested));

        extend_persistent(&env, &PersistentKey::CampaignTotals(campaign_id));
        extend_instance(&env);

        events::emit_investment_refunded(
            &env,
            events::InvestmentRefundedEvent {
                campaign_id,
                investor,
                amount: invested,
            },
        );

        Ok(true)
    }

    /// Rewrite a campaign's description and link. Name, goal, fundraiser
    /// and deadline are immutable.
    pub fn update_campaign_information(
        env: Env,
        fundraiser: Address,
        campaign_id: CampaignId,
        description: String,
        link: String,
    ) -> Result<bool, Error> {
        fundraiser.require_auth();

        let campaign = load_campaign(&env, campaign_id)?;
        if campaign.fundraiser != fundraiser {
            return Err(Error::NotOwner);
        }

        let information = CampaignInformation { description, link };
        env.storage().persistent().set(&PersistentKey::CampaignInformation(campaign_id), &information);
        extend_persistent(&env, &PersistentKey::CampaignInformation(campaign_id));

        events::emit_campaign_updated(
            &env,
            events::CampaignUpdatedEvent {
                campaign_id,
                fundraiser,
            },
        );

        Ok(true)
    }

    // View functions
    pub fn get_campaign(env: Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
        load_campaign(&env, campaign_id)
    }

    pub fn get_campaign_information(
        env: Env,
        campaign_id: CampaignId,
    ) -> Result<CampaignInformation, Error> {
        load_campaign(&env, campaign_id)?;
        Ok(env
            .storage()
            .persistent()
            .get(&PersistentKey::CampaignInformation(campaign_id))
            .unwrap())
    }

    pub fn get_campaign_totals(env: Env, campaign_id: CampaignId) -> Result<CampaignTotals, Error> {
        load_campaign(&env, campaign_id)?;
        Ok(load_totals(&env, campaign_id))
    }

    pub fn get_campaign_status(env: Env, campaign_id: CampaignId) -> Result<CampaignStatus, Error> {
        load_campaign(&env, campaign_id)?;
        Ok(load_status(&env, campaign_id))
    }

    /// A campaign is active while its deadline has not passed and its
    /// funds have not been collected.
    pub fn get_is_active_campaign(env: Env, campaign_id: CampaignId) -> Result<bool, Error> {
        let campaign = load_campaign(&env, campaign_id)?;
        let status = load_status(&env, campaign_id);
        Ok(!status.funded && env.ledger().sequence() <= campaign.target_block_height)
    }

    pub fn get_campaign_id_nonce(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::CampaignIdNonce).unwrap_or(0)
    }

    pub fn get_total_investments(env: Env) -> u64 {
        env.storage().instance().get(&DataKey::TotalInvestments).unwrap_or(0)
    }

    pub fn get_total_investment_value(env: Env) -> i128 {
        env.storage().instance().get(&DataKey::TotalInvestmentValue).unwrap_or(0)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage().persistent().extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn load_campaign(env: &Env, campaign_id: CampaignId) -> Result<Campaign, Error> {
    env.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign_id))
        .ok_or(Error::CampaignNotFound)
}

// Totals and status records exist for every assigned campaign id; these
// are only called after load_campaign has succeeded.
fn load_totals(env: &Env, campaign_id: CampaignId) -> CampaignTotals {
    env.storage().persistent().get(&PersistentKey::CampaignTotals(campaign_id)).unwrap()
}

fn load_status(env: &Env, campaign_id: CampaignId) -> CampaignStatus {
    env.storage().persistent().get(&PersistentKey::CampaignStatus(campaign_id)).unwrap()
}
