// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Givebridge Labs

//! CrowdFunding contract bindings and typed campaign parameters.

use alloy::{
    primitives::{Address, U256},
    sol,
};

/// Address of the deployed CrowdFunding contract.
pub const CROWDFUNDING_CONTRACT_ADDRESS: &str = "0xD7B189A02f6Bc6f041346474B981C856479bFaC0";

// Define the CrowdFunding interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface ICrowdFunding {
        struct TeamMember {
            string name;
            string role;
            string bio;
        }

        struct InvestmentTier {
            string tierTitle;
            uint256 minimumAmount;
            string description;
        }

        function createCampaign(
            address _campaignOwner,
            string _title,
            string _description,
            uint8 _category,
            string _projectDescription,
            uint256 _goalAmount,
            string _image,
            TeamMember[] _teamMembers,
            InvestmentTier[] _investmentTiers
        ) external returns (uint256);

        function donateToCampaign(uint256 _id) external payable;
    }
}

/// Campaign category codes as the contract encodes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum CampaignCategory {
    Education = 0,
    Healthcare = 1,
    Environment = 2,
    PovertyAlleviation = 3,
    HumanRights = 4,
    CommunityDevelopment = 5,
}

impl CampaignCategory {
    /// The uint8 code sent on the wire.
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// A campaign team member, as stored on-chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
}

/// A funding tier with its minimum contribution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestmentTier {
    pub tier_title: String,
    pub minimum_amount: U256,
    pub description: String,
}

/// Validated parameters for one `createCampaign` call.
///
/// Built from form state by the caller; [`crate::chain::CrowdFundingClient`]
/// turns it into the contract call.
#[derive(Debug, Clone)]
pub struct CampaignSpec {
    pub campaign_owner: Address,
    pub title: String,
    pub description: String,
    pub category: CampaignCategory,
    pub project_description: String,
    /// Goal in the campaign token's smallest unit (USDC, 6 decimals).
    pub goal_amount: U256,
    pub image: String,
    pub team_members: Vec<TeamMember>,
    pub investment_tiers: Vec<InvestmentTier>,
}

impl From<TeamMember> for ICrowdFunding::TeamMember {
    fn from(member: TeamMember) -> Self {
        ICrowdFunding::TeamMember {
            name: member.name,
            role: member.role,
            bio: member.bio,
        }
    }
}

impl From<InvestmentTier> for ICrowdFunding::InvestmentTier {
    fn from(tier: InvestmentTier) -> Self {
        ICrowdFunding::InvestmentTier {
            tierTitle: tier.tier_title,
            minimumAmount: tier.minimum_amount,
            description: tier.description,
        }
    }
}

impl CampaignSpec {
    /// Team members in the contract's tuple encoding.
    pub fn sol_team_members(&self) -> Vec<ICrowdFunding::TeamMember> {
        self.team_members.iter().cloned().map(Into::into).collect()
    }

    /// Investment tiers in the contract's tuple encoding.
    pub fn sol_investment_tiers(&self) -> Vec<ICrowdFunding::InvestmentTier> {
        self.investment_tiers.iter().cloned().map(Into::into).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_codes_match_contract_encoding() {
        assert_eq!(CampaignCategory::Education.code(), 0);
        assert_eq!(CampaignCategory::Healthcare.code(), 1);
        assert_eq!(CampaignCategory::Environment.code(), 2);
        assert_eq!(CampaignCategory::PovertyAlleviation.code(), 3);
        assert_eq!(CampaignCategory::HumanRights.code(), 4);
        assert_eq!(CampaignCategory::CommunityDevelopment.code(), 5);
    }

    #[test]
    fn spec_converts_to_sol_tuples() {
        let spec = CampaignSpec {
            campaign_owner: Address::ZERO,
            title: "Access to Quality Education".to_string(),
            description: "Empowering futures through accessible education".to_string(),
            category: CampaignCategory::Education,
            project_description: "Long form".to_string(),
            goal_amount: U256::from(1_000_000_000_000u64),
            image: "https://example.com/image.png".to_string(),
            team_members: vec![TeamMember {
                name: "Alice".to_string(),
                role: "Lead".to_string(),
                bio: "Expert in education".to_string(),
            }],
            investment_tiers: vec![InvestmentTier {
                tier_title: "Bronze".to_string(),
                minimum_amount: U256::from(1_000_000u64),
                description: "Thank you email".to_string(),
            }],
        };

        let members = spec.sol_team_members();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Alice");

        let tiers = spec.sol_investment_tiers();
        assert_eq!(tiers.len(), 1);
        assert_eq!(tiers[0].tierTitle, "Bronze");
        assert_eq!(tiers[0].minimumAmount, U256::from(1_000_000u64));
    }

    #[test]
    fn deployed_contract_address_parses() {
        let address: Address = CROWDFUNDING_CONTRACT_ADDRESS
            .parse()
            .expect("deployed address is valid");
        assert_ne!(address, Address::ZERO);
    }
}
