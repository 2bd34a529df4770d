//! Fixture builders
//!
//! Every identifying field (email, serial number, name) carries a fresh
//! uuid suffix so repeated runs against a persistent server never collide.
//! Booking windows are expressed relative to now so the fixtures stay in
//! the future regardless of when the suite runs.

use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};
use studioflow_common::types::{
    AvailabilityDay, BookingWindow, CompanyInfo, ContactInfo, Credentials, EquipmentStatus,
    KanbanStage, LineItem, NewAllocation, NewBooking, NewClient, NewEquipment, NewFreelancer,
    NewProject, NewProposal, PaymentInstallment, PortfolioVideo, RegisterUser, TeamMember,
};
use studioflow_common::DateRange;
use uuid::Uuid;

/// Short random identifier for unique fixture fields.
pub fn unique_suffix() -> String {
    let mut hex = Uuid::new_v4().simple().to_string();
    hex.truncate(12);
    hex
}

/// An instant `n` whole days from now, truncated to whole seconds so the
/// value survives a serialize/echo round trip unchanged.
pub fn days_from_now(n: i64) -> DateTime<Utc> {
    let now = Utc::now();
    now.with_nanosecond(0).unwrap_or(now) + Duration::days(n)
}

/// A calendar date `n` whole days from today.
pub fn date_from_today(n: i64) -> NaiveDate {
    days_from_now(n).date_naive()
}

pub fn register_user() -> RegisterUser {
    RegisterUser {
        email: format!("suite+{}@studioflow.test", unique_suffix()),
        password: "TestPass123!".to_string(),
        role: "user".to_string(),
        initial_capital: 10_000.0,
    }
}

pub fn credentials_of(user: &RegisterUser) -> Credentials {
    Credentials {
        email: user.email.clone(),
        password: user.password.clone(),
    }
}

pub fn client() -> NewClient {
    let suffix = unique_suffix();
    NewClient {
        name: format!("Suite Client {suffix}"),
        company: CompanyInfo {
            name: "Suite Company Inc.".to_string(),
            industry: "Audiovisual".to_string(),
            website: "https://suite-company.example.com".to_string(),
            address: "1234 Studio Ave, Film City".to_string(),
        },
        contact_info: ContactInfo {
            email: format!("contact+{suffix}@studioflow.test"),
            phone: "+1234567890".to_string(),
            mobile: "+1987654321".to_string(),
            fax: "+1234567899".to_string(),
        },
        notes: "Created by the acceptance suite".to_string(),
    }
}

pub fn freelancer() -> NewFreelancer {
    let suffix = unique_suffix();
    NewFreelancer {
        name: format!("Suite Freelancer {suffix}"),
        email: format!("freelancer+{suffix}@studioflow.test"),
        skills: vec!["Video Editing".to_string(), "Color Grading".to_string()],
        rating: 4.5,
        custom_rate: 150.0,
        availability: vec![
            AvailabilityDay {
                date: date_from_today(10),
                available: true,
            },
            AvailabilityDay {
                date: date_from_today(11),
                available: false,
            },
            AvailabilityDay {
                date: date_from_today(12),
                available: true,
            },
        ],
        notes: "Created by the acceptance suite".to_string(),
    }
}

pub fn equipment() -> NewEquipment {
    let suffix = unique_suffix();
    NewEquipment {
        name: format!("Suite Camera {suffix}"),
        kind: "Camera".to_string(),
        brand: "TestBrand".to_string(),
        model: "X1000".to_string(),
        serial_number: format!("SN-{suffix}"),
        purchase_date: date_from_today(-30),
        maintenance_due_date: date_from_today(90),
        status: EquipmentStatus::Available,
        notes: "Created by the acceptance suite".to_string(),
    }
}

/// Project wired to a client, with one team slot and one equipment booking
/// covering `booking`.
pub fn project(
    client_id: &str,
    freelancer_id: &str,
    equipment_id: &str,
    booking: DateRange,
) -> NewProject {
    NewProject {
        name: format!("Suite Project {}", unique_suffix()),
        client_id: Some(client_id.to_string()),
        description: "Full lifecycle acceptance project".to_string(),
        shooting_dates: vec![days_from_now(30), days_from_now(34)],
        delivery_dates: vec![days_from_now(50)],
        kanban_stage: KanbanStage::Lead,
        team_allocation: vec![TeamMember {
            freelancer_id: freelancer_id.to_string(),
            role: "Editor".to_string(),
        }],
        equipment_bookings: vec![BookingWindow {
            equipment_id: equipment_id.to_string(),
            start_date: booking.start,
            end_date: booking.end,
        }],
        notes: "Created by the acceptance suite".to_string(),
    }
}

/// Minimal project with no client, team, or bookings.
pub fn bare_project() -> NewProject {
    NewProject {
        name: format!("Suite Project {}", unique_suffix()),
        client_id: None,
        description: "Allocation target".to_string(),
        shooting_dates: vec![days_from_now(40), days_from_now(42)],
        delivery_dates: vec![days_from_now(55)],
        kanban_stage: KanbanStage::Lead,
        team_allocation: vec![],
        equipment_bookings: vec![],
        notes: "Created by the acceptance suite".to_string(),
    }
}

pub fn booking(equipment_id: &str, range: DateRange) -> NewBooking {
    NewBooking {
        equipment_id: equipment_id.to_string(),
        start_date: range.start,
        end_date: range.end,
        purpose: format!("Suite shoot {}", unique_suffix()),
    }
}

/// The standard proposal of the financial scenarios: two items, one
/// optional, a 50/50 schedule, one portfolio video, public sharing on.
/// Expected total: 7500.
pub fn proposal(client_id: &str) -> NewProposal {
    NewProposal {
        title: format!("Suite Proposal {}", unique_suffix()),
        client_id: client_id.to_string(),
        items: vec![
            LineItem {
                description: "Video Production Service".to_string(),
                quantity: 1.0,
                unit_price: 5000.0,
            },
            LineItem {
                description: "Editing Service".to_string(),
                quantity: 1.0,
                unit_price: 2000.0,
            },
        ],
        optionals: vec![LineItem {
            description: "Extra Drone Shots".to_string(),
            quantity: 1.0,
            unit_price: 500.0,
        }],
        payment_schedules: vec![
            PaymentInstallment {
                installment: 1,
                percentage: 50.0,
            },
            PaymentInstallment {
                installment: 2,
                percentage: 50.0,
            },
        ],
        portfolio_videos: vec![PortfolioVideo {
            url: "https://videos.studioflow.test/portfolio/showreel".to_string(),
            description: "Embedded portfolio video".to_string(),
        }],
        public_sharing: true,
    }
}

pub fn allocation(freelancer_id: &str, project_id: &str) -> NewAllocation {
    NewAllocation {
        freelancer_id: freelancer_id.to_string(),
        project_id: project_id.to_string(),
        custom_rate: 160.0,
        allocation_dates: vec![date_from_today(40), date_from_today(42)],
    }
}
