use soroban_sdk::{contracterror, contracttype, Address, String};

pub type CampaignId = u64;

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Token,
    CampaignIdNonce,
    TotalInvestments,
    TotalInvestmentValue,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    CampaignInformation(CampaignId),
    CampaignTotals(CampaignId),
    CampaignStatus(CampaignId),
    Investment(CampaignId, Address),
}

// Immutable after creation
#[derive(Clone)]
#[contracttype]
pub struct Campaign {
    pub name: String,
    pub fundraiser: Address,
    pub goal: i128,
    pub target_block_height: u32,
}

// Only record the fundraiser may rewrite
#[derive(Clone)]
#[contracttype]
pub struct CampaignInformation {
    pub description: String,
    pub link: String,
}

#[derive(Clone)]
#[contracttype]
pub struct CampaignTotals {
    pub total_investment: i128,
    pub total_investors: u64,
}

// target_reached is monotonic: once true it stays true even if refunds
// drop total_investment back below goal. funded implies target_reached.
#[derive(Clone)]
#[contracttype]
pub struct CampaignStatus {
    pub target_reached: bool,
    pub target_reached_height: u32,
    pub funded: bool,
}

// Error codes are part of the contract surface; callers match on the
// numeric value, so discriminants are fixed.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotOwner = 2,
    CampaignNotFound = 3,
    TargetNotReached = 4,
    InsufficientBalance = 5,
    NoInvestment = 6,
    AlreadyFunded = 7,
    InvalidAmount = 8,
}

// Constants
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
