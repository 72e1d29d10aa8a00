//! Typed wrappers for the tracker routes
//!
//! One method per backend route, grouped the way the screens use them.
//! Listing routes return a [`Listing`]; mutations return an
//! [`ActionOutcome`]. After a successful mutation the caller is expected to
//! reload the affected table.

use std::time::Duration;

use serde_json::json;

use super::ActionOutcome;
use super::Listing;
use crate::CorteClient;
use crate::error::ApiError;
use crate::model::Row;
use crate::prefs::QueryPrefs;

/// Client-side cap on XML generation, after which the call is abandoned.
pub const XML_GENERATION_TIMEOUT: Duration = Duration::from_secs(60);

fn page_query(page: u32, limit: u32, busca: Option<&str>) -> Vec<(String, String)> {
    let mut query = vec![
        ("page".to_string(), page.to_string()),
        ("limit".to_string(), limit.to_string()),
    ];
    if let Some(busca) = busca {
        if !busca.is_empty() {
            query.push(("busca".to_string(), busca.to_string()));
        }
    }
    query
}

impl CorteClient {
    // =========================================================================
    // Listings
    // =========================================================================

    /// Current stock.
    pub async fn stock(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/estoque", &[]).await
    }

    /// Optimized cutting batches awaiting stock entry.
    pub async fn optimized(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/otimizadas", &[]).await
    }

    /// Storage locations.
    pub async fn locations(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/locais", &[]).await
    }

    /// Parts stored at one location.
    pub async fn location_details(&self, location: &str) -> Result<Listing, ApiError> {
        self.fetch_listing(&format!("api/local-detalhes/{location}"), &[])
            .await
    }

    /// Part counts per location.
    pub async fn location_counts(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/contagem-pecas-locais", &[]).await
    }

    /// Registered users.
    pub async fn users(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/usuarios", &[]).await
    }

    /// Control report rows.
    pub async fn control_report(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/relatorio-controle", &[]).await
    }

    /// Cut-file records.
    pub async fn cut_files(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/arquivos", &[]).await
    }

    /// Audit log, paginated, with optional server-side search.
    pub async fn logs(&self, page: u32, limit: u32, busca: Option<&str>) -> Result<Listing, ApiError> {
        self.fetch_listing("api/logs", &page_query(page, limit, busca))
            .await
    }

    /// Outbound movement history, paginated.
    pub async fn outbound(&self, page: u32, limit: u32) -> Result<Listing, ApiError> {
        self.fetch_listing("api/saidas", &page_query(page, limit, None))
            .await
    }

    /// Outbound exits awaiting confirmation.
    pub async fn outbound_exits(&self) -> Result<Listing, ApiError> {
        self.fetch_listing("api/saidas-exit", &[]).await
    }

    /// Collected production appointments for the given date-range/stage
    /// filter.
    pub async fn collection(&self, prefs: &QueryPrefs) -> Result<Listing, ApiError> {
        self.fetch_listing("api/dados", &prefs.to_query()).await
    }

    // =========================================================================
    // Stock and batch mutations
    // =========================================================================

    /// Re-imports appointments from the production system before a
    /// collection fetch.
    pub async fn refresh_appointments(&self) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/atualizar-apontamentos", &json!({})).await
    }

    /// Removes parts from stock (confirmed usage or bulk outbound).
    pub async fn remove_stock(&self, ids: &[String]) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/remover-estoque", &json!({ "ids": ids })).await
    }

    /// Moves optimized parts into stock.
    pub async fn send_to_stock(&self, ids: &[String]) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/enviar-estoque", &json!({ "ids": ids })).await
    }

    /// Deletes optimized parts, recording the mandatory reason.
    pub async fn delete_optimized(&self, ids: &[String], motivo: &str) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/excluir-otimizadas", &json!({ "ids": ids, "motivo": motivo }))
            .await
    }

    /// Submits collected parts for cutting optimization.
    pub async fn optimize_parts(&self, pecas: &[Row]) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/otimizar-pecas", &json!({ "pecas": pecas })).await
    }

    /// Inserts one part by hand into the collection table.
    pub async fn add_manual_part(
        &self,
        op: &str,
        peca: &str,
        projeto: &str,
        veiculo: &str,
    ) -> Result<ActionOutcome, ApiError> {
        self.post_action(
            "api/adicionar-peca-manual",
            &json!({ "op": op, "peca": peca, "projeto": projeto, "veiculo": veiculo }),
        )
        .await
    }

    /// Generates cutting XMLs for the selected parts.
    ///
    /// XML generation runs a slow automation on the server; the call is
    /// bounded by [`XML_GENERATION_TIMEOUT`] and reported as
    /// [`ApiError::Timeout`] when exceeded. Use
    /// [`generate_xml_with_timeout`](Self::generate_xml_with_timeout) to
    /// override the bound.
    pub async fn generate_xml(&self, pecas: &[Row]) -> Result<ActionOutcome, ApiError> {
        self.generate_xml_with_timeout(pecas, XML_GENERATION_TIMEOUT).await
    }

    /// Generates cutting XMLs with an explicit per-call timeout.
    pub async fn generate_xml_with_timeout(
        &self,
        pecas: &[Row],
        timeout: Duration,
    ) -> Result<ActionOutcome, ApiError> {
        self.post_action_timeout("api/gerar-xml", &json!({ "pecas": pecas }), timeout)
            .await
    }

    // =========================================================================
    // Location mutations
    // =========================================================================

    /// Registers a new storage location.
    pub async fn add_location(&self, local: &str, nome: &str) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/adicionar-local", &json!({ "local": local, "nome": nome }))
            .await
    }

    /// Enables or disables a storage location.
    pub async fn set_location_status(&self, local: &str, status: &str) -> Result<ActionOutcome, ApiError> {
        self.put_action("api/alterar-status-local", &json!({ "local": local, "status": status }))
            .await
    }

    // =========================================================================
    // User mutations
    // =========================================================================

    /// Registers a new user.
    pub async fn register_user(
        &self,
        username: &str,
        password: &str,
        role: &str,
        setor: &str,
        email: &str,
    ) -> Result<ActionOutcome, ApiError> {
        self.post_action(
            "api/cadastrar-usuario",
            &json!({
                "username": username,
                "password": password,
                "role": role,
                "setor": setor,
                "email": email,
            }),
        )
        .await
    }

    /// Updates a user's name, role and sector.
    pub async fn edit_user(
        &self,
        id: &str,
        usuario: &str,
        funcao: &str,
        setor: &str,
    ) -> Result<ActionOutcome, ApiError> {
        self.put_action(
            &format!("api/editar-usuario/{id}"),
            &json!({ "usuario": usuario, "funcao": funcao, "setor": setor }),
        )
        .await
    }

    /// Resets a user's password.
    pub async fn reset_password(&self, id: &str, senha: &str) -> Result<ActionOutcome, ApiError> {
        self.put_action(&format!("api/resetar-senha/{id}"), &json!({ "senha": senha }))
            .await
    }

    /// Deletes a user.
    pub async fn delete_user(&self, id: &str) -> Result<ActionOutcome, ApiError> {
        self.delete_action(&format!("api/excluir-usuario/{id}")).await
    }

    // =========================================================================
    // Cut-file mutations
    // =========================================================================

    /// Creates a cut-file record.
    pub async fn add_cut_file(&self, arquivo: &Row) -> Result<ActionOutcome, ApiError> {
        self.post_action("api/arquivos", arquivo).await
    }

    /// Updates a cut-file record.
    pub async fn update_cut_file(&self, id: &str, arquivo: &Row) -> Result<ActionOutcome, ApiError> {
        self.put_action(&format!("api/arquivos/{id}"), arquivo).await
    }

    /// Deletes a cut-file record.
    pub async fn delete_cut_file(&self, id: &str) -> Result<ActionOutcome, ApiError> {
        self.delete_action(&format!("api/arquivos/{id}")).await
    }
}
