//! Wire types for the StudioFlow production management API
//!
//! Enums carry the exact serialized values the server speaks; payload
//! structs carry the exact field names the endpoints expect. The suite
//! only ever sends these shapes — responses are inspected as loose JSON
//! because the server owns its own response schema.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Production pipeline stage of a project on the kanban board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KanbanStage {
    Lead,
    PreProduction,
    Shooting,
    PostProduction,
    Review,
    Done,
}

impl KanbanStage {
    pub const ALL: [KanbanStage; 6] = [
        KanbanStage::Lead,
        KanbanStage::PreProduction,
        KanbanStage::Shooting,
        KanbanStage::PostProduction,
        KanbanStage::Review,
        KanbanStage::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KanbanStage::Lead => "Lead",
            KanbanStage::PreProduction => "PreProduction",
            KanbanStage::Shooting => "Shooting",
            KanbanStage::PostProduction => "PostProduction",
            KanbanStage::Review => "Review",
            KanbanStage::Done => "Done",
        }
    }
}

impl fmt::Display for KanbanStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KanbanStage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "kanban stage",
                value: s.to_string(),
            })
    }
}

/// Operational status of a piece of equipment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EquipmentStatus {
    Available,
    InUse,
    Maintenance,
    Retired,
}

impl EquipmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Available",
            EquipmentStatus::InUse => "InUse",
            EquipmentStatus::Maintenance => "Maintenance",
            EquipmentStatus::Retired => "Retired",
        }
    }
}

impl fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a financial transaction from the organization's viewpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money owed to the organization (proposal acceptance)
    Receivable,
    /// Money owed by the organization (freelancer allocation)
    Payable,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Receivable => "receivable",
            TransactionKind::Payable => "payable",
        }
    }
}

impl FromStr for TransactionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "receivable" => Ok(TransactionKind::Receivable),
            "payable" => Ok(TransactionKind::Payable),
            other => Err(Error::UnknownVariant {
                kind: "transaction kind",
                value: other.to_string(),
            }),
        }
    }
}

/// Lifecycle status of a proposal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    Draft,
    Sent,
    Viewed,
    Accepted,
    Rejected,
    Expired,
}

impl ProposalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProposalStatus::Draft => "draft",
            ProposalStatus::Sent => "sent",
            ProposalStatus::Viewed => "viewed",
            ProposalStatus::Accepted => "accepted",
            ProposalStatus::Rejected => "rejected",
            ProposalStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Module a global search result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchModule {
    Clients,
    Projects,
    Freelancers,
    Equipment,
    Proposals,
    Financial,
    Dashboard,
}

impl SearchModule {
    pub const ALL: [SearchModule; 7] = [
        SearchModule::Clients,
        SearchModule::Projects,
        SearchModule::Freelancers,
        SearchModule::Equipment,
        SearchModule::Proposals,
        SearchModule::Financial,
        SearchModule::Dashboard,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchModule::Clients => "clients",
            SearchModule::Projects => "projects",
            SearchModule::Freelancers => "freelancers",
            SearchModule::Equipment => "equipment",
            SearchModule::Proposals => "proposals",
            SearchModule::Financial => "financial",
            SearchModule::Dashboard => "dashboard",
        }
    }
}

impl FromStr for SearchModule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|module| module.as_str() == s)
            .ok_or_else(|| Error::UnknownVariant {
                kind: "search module",
                value: s.to_string(),
            })
    }
}

// ---------------------------------------------------------------------------
// Request payloads
// ---------------------------------------------------------------------------

/// Registration payload for `POST /auth/register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(rename = "initialCapital")]
    pub initial_capital: f64,
}

/// Login payload for `POST /auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Company block of a client record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub industry: String,
    pub website: String,
    pub address: String,
}

/// Contact block of a client record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub mobile: String,
    pub fax: String,
}

/// Client creation/update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub company: CompanyInfo,
    pub contact_info: ContactInfo,
    pub notes: String,
}

/// A freelancer slot on a project team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamMember {
    pub freelancer_id: String,
    pub role: String,
}

/// Equipment reservation embedded in a project payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingWindow {
    pub equipment_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

/// Project creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProject {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    pub description: String,
    pub shooting_dates: Vec<DateTime<Utc>>,
    pub delivery_dates: Vec<DateTime<Utc>>,
    pub kanban_stage: KanbanStage,
    pub team_allocation: Vec<TeamMember>,
    pub equipment_bookings: Vec<BookingWindow>,
    pub notes: String,
}

/// One day of a freelancer availability calendar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityDay {
    pub date: NaiveDate,
    pub available: bool,
}

/// Freelancer creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFreelancer {
    pub name: String,
    pub email: String,
    pub skills: Vec<String>,
    pub rating: f64,
    pub custom_rate: f64,
    pub availability: Vec<AvailabilityDay>,
    pub notes: String,
}

/// Equipment creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEquipment {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub brand: String,
    pub model: String,
    pub serial_number: String,
    pub purchase_date: NaiveDate,
    pub maintenance_due_date: NaiveDate,
    pub status: EquipmentStatus,
    pub notes: String,
}

/// Standalone equipment booking payload for `POST /equipment-bookings`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub equipment_id: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub purpose: String,
}

/// One billable line of a proposal (also used for optionals)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

/// One installment of a proposal payment schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInstallment {
    pub installment: u32,
    pub percentage: f64,
}

/// Embedded portfolio video on a proposal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PortfolioVideo {
    pub url: String,
    pub description: String,
}

/// Proposal creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProposal {
    pub title: String,
    pub client_id: String,
    pub items: Vec<LineItem>,
    pub optionals: Vec<LineItem>,
    pub payment_schedules: Vec<PaymentInstallment>,
    pub portfolio_videos: Vec<PortfolioVideo>,
    pub public_sharing: bool,
}

/// Freelancer-to-project allocation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAllocation {
    pub freelancer_id: String,
    pub project_id: String,
    pub custom_rate: f64,
    pub allocation_dates: Vec<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kanban_stage_wire_values() {
        assert_eq!(
            serde_json::to_value(KanbanStage::Lead).unwrap(),
            json!("Lead")
        );
        assert_eq!(
            serde_json::to_value(KanbanStage::PostProduction).unwrap(),
            json!("PostProduction")
        );
    }

    #[test]
    fn kanban_stage_round_trips() {
        for stage in KanbanStage::ALL {
            assert_eq!(stage.as_str().parse::<KanbanStage>().unwrap(), stage);
        }
        assert!("Lede".parse::<KanbanStage>().is_err());
    }

    #[test]
    fn transaction_kind_is_lowercase_on_the_wire() {
        assert_eq!(
            serde_json::to_value(TransactionKind::Payable).unwrap(),
            json!("payable")
        );
        assert_eq!(
            "receivable".parse::<TransactionKind>().unwrap(),
            TransactionKind::Receivable
        );
    }

    #[test]
    fn search_module_membership() {
        for module in SearchModule::ALL {
            assert_eq!(module.as_str().parse::<SearchModule>().unwrap(), module);
        }
        let err = "billing".parse::<SearchModule>().unwrap_err();
        assert_eq!(
            err,
            Error::UnknownVariant {
                kind: "search module",
                value: "billing".to_string()
            }
        );
    }

    #[test]
    fn register_payload_uses_camel_case_capital() {
        let payload = RegisterUser {
            email: "user@example.com".to_string(),
            password: "secret".to_string(),
            role: "user".to_string(),
            initial_capital: 10_000.0,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["initialCapital"], json!(10_000.0));
        assert!(value.get("initial_capital").is_none());
    }

    #[test]
    fn equipment_payload_renames_kind_to_type() {
        let payload = NewEquipment {
            name: "Camera".to_string(),
            kind: "Camera".to_string(),
            brand: "TestBrand".to_string(),
            model: "X1000".to_string(),
            serial_number: "SN-1".to_string(),
            purchase_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
            maintenance_due_date: NaiveDate::from_ymd_opt(2026, 4, 15).unwrap(),
            status: EquipmentStatus::Available,
            notes: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["type"], json!("Camera"));
        assert_eq!(value["status"], json!("Available"));
        assert_eq!(value["purchase_date"], json!("2026-01-15"));
    }

    #[test]
    fn project_payload_omits_absent_client() {
        let payload = NewProject {
            name: "Bare".to_string(),
            client_id: None,
            description: String::new(),
            shooting_dates: vec![],
            delivery_dates: vec![],
            kanban_stage: KanbanStage::Lead,
            team_allocation: vec![],
            equipment_bookings: vec![],
            notes: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert!(value.get("client_id").is_none());
        assert_eq!(value["kanban_stage"], json!("Lead"));
    }
}
