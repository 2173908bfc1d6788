use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use foodgram_auth_types::identity::IdentityHeaders;

use crate::error::RecipesServiceError;
use crate::state::AppState;
use crate::usecase::shopping_list::DownloadShoppingListUseCase;

// ── GET /recipes/download_shopping_cart ──────────────────────────────────────

pub async fn download_shopping_cart(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Response, RecipesServiceError> {
    let usecase = DownloadShoppingListUseCase {
        repo: state.shopping_list_repo(),
    };
    let text = usecase.execute(identity.user_id).await?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.shopping_list_filename
    );
    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        text,
    )
        .into_response())
}
