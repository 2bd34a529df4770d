//! Typed endpoint surface of the StudioFlow API
//!
//! One thin method per exercised endpoint, all returning the raw
//! [`ApiResponse`] for the assertion layer. Paths are canonical: everything
//! lives under the configured prefix, the financial surface under
//! `financial/...`, filters as plain query parameters. Deletions that are
//! not themselves asserted on flow through the cleanup stack as raw
//! resource paths instead.

use serde_json::json;
use studioflow_common::types::{
    AvailabilityDay, Credentials, KanbanStage, NewAllocation, NewBooking, NewClient, NewEquipment,
    NewFreelancer, NewProject, NewProposal, RegisterUser, TeamMember,
};

use crate::error::E2eResult;
use crate::http::{ApiClient, ApiResponse};

impl ApiClient {
    // Auth operations

    pub async fn register(&self, user: &RegisterUser) -> E2eResult<ApiResponse> {
        self.post("/auth/register", user).await
    }

    pub async fn login(&self, credentials: &Credentials) -> E2eResult<ApiResponse> {
        self.post("/auth/login", credentials).await
    }

    /// Profile of the bearer-authenticated user.
    pub async fn profile(&self) -> E2eResult<ApiResponse> {
        self.get("/auth/profile").await
    }

    pub async fn delete_user(&self, user_id: &str) -> E2eResult<ApiResponse> {
        self.delete(&format!("/auth/users/{user_id}")).await
    }

    // Client operations

    pub async fn create_client(&self, client: &NewClient) -> E2eResult<ApiResponse> {
        self.post("/clients", client).await
    }

    pub async fn get_client(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/clients/{id}")).await
    }

    pub async fn update_client(&self, id: &str, client: &NewClient) -> E2eResult<ApiResponse> {
        self.put(&format!("/clients/{id}"), client).await
    }

    pub async fn delete_client(&self, id: &str) -> E2eResult<ApiResponse> {
        self.delete(&format!("/clients/{id}")).await
    }

    // Project operations

    pub async fn create_project(&self, project: &NewProject) -> E2eResult<ApiResponse> {
        self.post("/projects", project).await
    }

    pub async fn get_project(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/projects/{id}")).await
    }

    /// Move a project to another kanban stage.
    pub async fn update_kanban(&self, id: &str, stage: KanbanStage) -> E2eResult<ApiResponse> {
        self.put(&format!("/projects/{id}/kanban"), &json!({ "kanban_stage": stage }))
            .await
    }

    /// Kanban board view for a project's pipeline.
    pub async fn kanban_board(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/projects/{id}/kanban")).await
    }

    /// Replace the shooting-date list of a project.
    pub async fn update_shooting_dates(
        &self,
        id: &str,
        shooting_dates: &[chrono::DateTime<chrono::Utc>],
    ) -> E2eResult<ApiResponse> {
        self.put(
            &format!("/projects/{id}/dates"),
            &json!({ "shooting_dates": shooting_dates }),
        )
        .await
    }

    pub async fn add_team_member(&self, id: &str, member: &TeamMember) -> E2eResult<ApiResponse> {
        self.post(&format!("/projects/{id}/team"), member).await
    }

    // Freelancer operations

    pub async fn create_freelancer(&self, freelancer: &NewFreelancer) -> E2eResult<ApiResponse> {
        self.post("/freelancers", freelancer).await
    }

    /// Detail view with related collections, e.g. `allocations,payables`.
    pub async fn freelancer_detail(&self, id: &str, include: &str) -> E2eResult<ApiResponse> {
        self.get_query(&format!("/freelancers/{id}"), &[("include", include)])
            .await
    }

    /// Partial update; the server merges the given fields.
    pub async fn update_freelancer(
        &self,
        id: &str,
        fields: &serde_json::Value,
    ) -> E2eResult<ApiResponse> {
        self.put(&format!("/freelancers/{id}"), fields).await
    }

    pub async fn update_availability(
        &self,
        id: &str,
        availability: &[AvailabilityDay],
    ) -> E2eResult<ApiResponse> {
        self.patch(&format!("/freelancers/{id}/availability"), &availability)
            .await
    }

    // Allocation operations

    pub async fn create_allocation(&self, allocation: &NewAllocation) -> E2eResult<ApiResponse> {
        self.post("/freelancer-allocations", allocation).await
    }

    // Equipment operations

    pub async fn create_equipment(&self, equipment: &NewEquipment) -> E2eResult<ApiResponse> {
        self.post("/equipments", equipment).await
    }

    pub async fn get_equipment(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/equipments/{id}")).await
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> E2eResult<ApiResponse> {
        self.post("/equipment-bookings", booking).await
    }

    /// ROI metric and booking calendar for one piece of equipment.
    pub async fn equipment_roi(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/equipments/{id}/roi")).await
    }

    // Proposal operations

    pub async fn create_proposal(&self, proposal: &NewProposal) -> E2eResult<ApiResponse> {
        self.post("/proposals", proposal).await
    }

    pub async fn get_proposal(&self, id: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/proposals/{id}")).await
    }

    pub async fn accept_proposal(&self, id: &str) -> E2eResult<ApiResponse> {
        self.post_empty(&format!("/proposals/{id}/accept")).await
    }

    /// Unauthenticated read through a public sharing token.
    pub async fn public_proposal(&self, token: &str) -> E2eResult<ApiResponse> {
        self.get(&format!("/proposals/public/{token}")).await
    }

    // Financial operations

    pub async fn transactions(&self, filter: &[(&str, &str)]) -> E2eResult<ApiResponse> {
        self.get_query("/financial/transactions", filter).await
    }

    pub async fn receivables(&self) -> E2eResult<ApiResponse> {
        self.get("/financial/receivables").await
    }

    pub async fn payables(&self) -> E2eResult<ApiResponse> {
        self.get("/financial/payables").await
    }

    pub async fn cashflow_dashboard(&self) -> E2eResult<ApiResponse> {
        self.get("/financial/cashflow-dashboard").await
    }

    // Aggregate views

    pub async fn dashboard(&self) -> E2eResult<ApiResponse> {
        self.get("/dashboard").await
    }

    pub async fn search(&self, query: &str) -> E2eResult<ApiResponse> {
        self.get_query("/search", &[("q", query)]).await
    }
}
