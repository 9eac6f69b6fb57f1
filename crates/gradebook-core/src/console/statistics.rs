use crate::api::ApiClient;
use crate::error::ConsoleError;
use crate::http::Transport;
use crate::view::StatisticsView;

pub fn load_statistics<T: Transport + ?Sized>(
    api: &ApiClient<'_, T>,
    subject: Option<&str>,
) -> Result<StatisticsView, ConsoleError> {
    let stats = api.statistics(subject)?;
    Ok(StatisticsView::new(subject.map(str::to_string), stats))
}
