use std::fmt::Write as _;
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    schemars, tool, tool_handler, tool_router,
};

use crate::domain::filter_sort::{self, ResultFilter, SortOrder};
use crate::domain::query::SearchQuery;
use crate::domain::record::{InventoryRecord, SourceKind};
use crate::domain::response::SearchResponse;
use crate::ports::hotel_search::HotelSearch;

// ---------- Tool parameter types ----------

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct HotelSearchToolParams {
    /// Three-letter city code (e.g. "NYC", "PAR", "LON")
    pub location_code: String,
    /// Check-in date (YYYY-MM-DD)
    pub check_in: String,
    /// Check-out date (YYYY-MM-DD), strictly after check-in
    pub check_out: String,
    /// Number of guests (default: 1)
    pub guests: Option<u32>,
    /// Maximum number of hotels to return
    pub max_results: Option<usize>,
    /// Minimum price for the stay
    pub min_price: Option<f64>,
    /// Maximum price for the stay
    pub max_price: Option<f64>,
    /// Minimum rating on a 0-5 scale
    pub min_rating: Option<f64>,
    /// Amenities every hotel must offer (case-insensitive, e.g. ["wifi", "pool"])
    pub amenities: Option<Vec<String>>,
    /// Sort order: recommended (default), price_asc, price_desc, rating_desc, name
    pub sort: Option<String>,
}

#[derive(Clone)]
pub struct InventoryMcpServer {
    search: Arc<dyn HotelSearch>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl InventoryMcpServer {
    pub fn new(search: Arc<dyn HotelSearch>) -> Self {
        Self {
            search,
            tool_router: Self::tool_router(),
        }
    }

    /// Search hotels for a city and date range, falling back across providers.
    #[tool(
        name = "hotel_search",
        description = "Search hotels by city code, check-in/check-out dates and guest count. Tries the primary aggregator, then the secondary supplier, and as a last resort returns clearly flagged placeholder hotels so a list is always shown. Optional filters narrow the result by price, rating and amenities.",
        annotations(read_only_hint = true, open_world_hint = true)
    )]
    async fn hotel_search(
        &self,
        Parameters(params): Parameters<HotelSearchToolParams>,
    ) -> Result<CallToolResult, McpError> {
        let sort = match params.sort.as_deref().map(str::parse::<SortOrder>) {
            None => SortOrder::default(),
            Some(Ok(sort)) => sort,
            Some(Err(e)) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Invalid sort: {e}. Use one of recommended, price_asc, price_desc, rating_desc, name."
                ))]));
            }
        };

        let query = match SearchQuery::parse(
            &params.location_code,
            &params.check_in,
            &params.check_out,
            params.guests.unwrap_or(1),
        ) {
            Ok(query) => match params.max_results {
                Some(max) => query.with_max_results(max),
                None => query,
            },
            Err(e) => {
                return Ok(CallToolResult::error(vec![Content::text(format!(
                    "Invalid search: {e}"
                ))]));
            }
        };

        let filter = ResultFilter {
            min_price: params.min_price,
            max_price: params.max_price,
            min_rating: params.min_rating,
            required_amenities: params.amenities.unwrap_or_default(),
        };

        match self.search.search(&query).await {
            Ok(response) => {
                let shown = filter_sort::apply(&response.records, &filter, sort);
                Ok(CallToolResult::success(vec![Content::text(format_response(
                    &query, &response, &shown,
                ))]))
            }
            Err(e) => Ok(CallToolResult::error(vec![Content::text(format!(
                "Hotel search failed: {e}. Check the city code and that check-out is after check-in."
            ))])),
        }
    }
}

fn format_response(
    query: &SearchQuery,
    response: &SearchResponse,
    shown: &[InventoryRecord],
) -> String {
    let mut text = String::new();
    let _ = writeln!(
        text,
        "Hotels in {} from {} to {} ({} nights, {} guests), source: {}\n",
        query.normalized_code(),
        query.check_in_str(),
        query.check_out_str(),
        query.nights(),
        query.party_size,
        response.source_used,
    );
    if response.source_used == SourceKind::Synthetic {
        text.push_str(
            "Note: no live inventory was available. The hotels below are placeholders \
             and cannot be booked.\n\n",
        );
    }

    if shown.is_empty() {
        let _ = writeln!(
            text,
            "None of the {} hotels found match the filters. Try relaxing price, rating or amenity filters.",
            response.records.len()
        );
        return text;
    }

    let _ = writeln!(text, "Showing {} of {} hotels:\n", shown.len(), response.records.len());
    for (i, record) in shown.iter().enumerate() {
        let _ = write!(
            text,
            "{}. **{}** (ID: {})\n   {}\n   {} {:.2}",
            i + 1,
            record.display_name,
            record.id,
            record.location_label,
            record.price.currency,
            record.price.amount,
        );
        if record.price.is_estimated() {
            text.push_str(" (estimated)");
        }
        let _ = write!(text, " | Rating: {:.1}", record.rating);
        if record.is_synthetic() {
            text.push_str(" | placeholder");
        }
        if !record.amenities.is_empty() {
            let _ = write!(text, "\n   Amenities: {}", record.amenities.join(", "));
        }
        text.push_str("\n\n");
    }
    text
}

#[tool_handler]
impl ServerHandler for InventoryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "Hotel inventory MCP server.\n\
                 \n\
                 Use hotel_search with a three-letter city code and ISO dates. Results come from \
                 the primary aggregator when it has matches, otherwise from the secondary supplier. \
                 When neither has inventory the response is marked as placeholder data.\n\
                 \n\
                 ## Tips\n\
                 - Prices marked (estimated) were not quoted by a supplier.\n\
                 - Filters (min_price, max_price, min_rating, amenities) apply after resolution \
                   and can return an empty list."
                    .into(),
            ),
        }
    }
}
