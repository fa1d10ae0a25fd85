//! Main page and the auto-refreshing zone section.

use askama::Template;
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Response};
use serde::Deserialize;

use ofp_app::dashboard::{DashboardPage, Selection, ZoneSection};
use ofp_app::ports::ControllerApi;
use ofp_app::views::plannings::EMPTY_PLANNING_MESSAGE;
use ofp_domain::id::HardwareId;

use crate::state::AppState;

/// Main page template.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    page: DashboardPage,
    empty_planning_message: &'static str,
}

impl IntoResponse for IndexTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Zone section page template, reloaded by the browser every `refresh_seconds`.
#[derive(Template)]
#[template(path = "zones.html")]
pub struct ZonesTemplate {
    refresh_seconds: u32,
    section: ZoneSection,
}

impl IntoResponse for ZonesTemplate {
    fn into_response(self) -> Response {
        Html(self.to_string()).into_response()
    }
}

/// Selection carried by the query string. Unparsable values are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub planning: Option<String>,
    pub hardware: Option<String>,
}

impl From<PageQuery> for Selection {
    fn from(query: PageQuery) -> Self {
        Self {
            planning: query.planning.and_then(|raw| raw.parse().ok()),
            hardware: query
                .hardware
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
                .map(HardwareId::new),
        }
    }
}

/// `GET /` loads every section.
pub async fn index<A>(
    State(state): State<AppState<A>>,
    Query(query): Query<PageQuery>,
) -> IndexTemplate
where
    A: ControllerApi + 'static,
{
    let page = state.dashboard.bootstrap(query.into()).await;
    IndexTemplate {
        page,
        empty_planning_message: EMPTY_PLANNING_MESSAGE,
    }
}

/// `GET /zones` serves the latest zone snapshot.
pub async fn zones<A>(State(state): State<AppState<A>>) -> ZonesTemplate
where
    A: ControllerApi + 'static,
{
    ZonesTemplate {
        refresh_seconds: state.refresh_seconds,
        section: state.dashboard.zone_section().await,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use tower::ServiceExt;

    use ofp_domain::id::PlanningId;

    use super::*;
    use crate::dashboard::testing::{app, body_text, get};

    fn empty_page(admin: bool) -> DashboardPage {
        DashboardPage {
            status: None,
            zone_override: None,
            zones: None,
            plannings: None,
            slots: None,
            accounts: None,
            hardware: None,
            admin,
            errors: vec!["Erreur lors de la récupération /ofp-api/v1/status : 500".to_string()],
        }
    }

    #[test]
    fn should_parse_selection_leniently() {
        let selection = Selection::from(PageQuery {
            planning: Some("abc".to_string()),
            hardware: Some(" OFP-10Z ".to_string()),
        });
        assert_eq!(selection.planning, None);
        assert_eq!(selection.hardware, Some(HardwareId::new("OFP-10Z")));

        let selection = Selection::from(PageQuery {
            planning: Some("2".to_string()),
            hardware: Some(String::new()),
        });
        assert_eq!(selection.planning, Some(PlanningId::new(2)));
        assert_eq!(selection.hardware, None);
    }

    #[test]
    fn should_hide_admin_sections_without_administrator() {
        let html = IndexTemplate {
            page: empty_page(false),
            empty_planning_message: EMPTY_PLANNING_MESSAGE,
        }
        .to_string();
        assert!(html.contains("Erreur lors de la récupération"));
        assert!(!html.contains("action=\"/firmware\""));
        assert!(!html.contains("action=\"/certificate\""));
        assert!(!html.contains("action=\"/accounts\""));
    }

    #[tokio::test]
    async fn should_render_every_section_for_administrator() {
        let (app, _) = app();

        let response = app.oneshot(get("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("Système démarré depuis"));
        assert!(html.contains("Aucun forçage"));
        assert!(html.contains("chambre parents"));
        assert!(html.contains("Programmation: Pièces de vie"));
        assert!(html.contains("action=\"/accounts\""));
        assert!(html.contains("action=\"/firmware\""));
        assert!(html.contains("action=\"/certificate\""));
        assert!(html.contains("name=\"param.ext_count\""));
    }

    #[tokio::test]
    async fn should_edit_requested_planning() {
        let (app, _) = app();

        let response = app.oneshot(get("/?planning=2")).await.unwrap();

        let html = body_text(response).await;
        assert!(html.contains("<option value=\"2\" selected>Chambres</option>"));
        assert!(html.contains("action=\"/plannings/2/slots\""));
    }

    #[tokio::test]
    async fn should_serve_zone_section_with_meta_refresh() {
        let (app, _) = app();

        let response = app.oneshot(get("/zones")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("<meta http-equiv=\"refresh\" content=\"5\">"));
        assert!(html.contains("salle de bain"));
    }
}
