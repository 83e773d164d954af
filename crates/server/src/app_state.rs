use pages::PageContext;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pages: PageContext,
}
