#[derive(Debug, Clone)]
pub enum AppEvent {
    RecordsChanged,
    ConfigChanged,
}
