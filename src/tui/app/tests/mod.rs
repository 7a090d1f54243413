pub(crate) use super::*;
pub(crate) use crate::settings::InMemorySettings;

mod interaction;

pub(crate) async fn make_app() -> App<InMemorySettings> {
    let mut app = App::new(
        "acme",
        Arc::new(InMemorySettings::new()),
        Duration::from_millis(250),
    );
    app.load().await;
    app
}

pub(crate) fn position(app: &App<InMemorySettings>, id: &str) -> crate::layout::WidgetPosition {
    app.store.widget(id).expect("widget exists").position
}
