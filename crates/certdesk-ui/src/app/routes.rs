//! Routing definitions for the admin UI.
use yew_router::prelude::*;

#[derive(Clone, Routable, PartialEq, Eq, Debug)]
pub(crate) enum Route {
    #[at("/")]
    Dashboard,
    #[at("/upload")]
    Upload,
    #[at("/upload/:batch_id")]
    UploadProgress { batch_id: String },
    #[not_found]
    #[at("/404")]
    NotFound,
}
