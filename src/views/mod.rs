//! Text rendering of the dashboard.
//!
//! Each tab is a [`View`]: it fetches what it needs from the stores when
//! mounted, keeps it as local state, and renders to a string. A failed fetch
//! is logged and leaves the view's previous state in place.

mod attendance;
mod calendar;
mod dashboard;
mod grades;
mod shell;
mod tab;
mod weather;

pub use attendance::*;
pub use calendar::*;
pub use dashboard::*;
pub use grades::*;
pub use shell::*;
pub use tab::*;
pub use weather::*;

use chrono::{Local, Timelike};

use crate::models::User;
use crate::store::Stores;

/// Everything a view may read while mounting.
#[derive(Clone, Copy)]
pub struct ViewContext<'a> {
    pub user: &'a User,
    pub stores: &'a Stores,
    /// City for the weather widget.
    pub city: &'a str,
    /// Local hour of day, for the greeting.
    pub hour: u32,
}

impl<'a> ViewContext<'a> {
    pub fn new(user: &'a User, stores: &'a Stores, city: &'a str) -> Self {
        Self {
            user,
            stores,
            city,
            hour: Local::now().hour(),
        }
    }

    pub fn at_hour(mut self, hour: u32) -> Self {
        self.hour = hour;
        self
    }
}

/// A page of the dashboard.
#[allow(async_fn_in_trait)]
pub trait View {
    /// Fetch data for `ctx`. Failures are logged, never returned.
    async fn mount(&mut self, ctx: &ViewContext<'_>);

    fn render(&self) -> String;
}

async fn mounted<V: View>(mut view: V, ctx: &ViewContext<'_>) -> String {
    view.mount(ctx).await;
    view.render()
}

/// Mount and render the content area of `tab`.
pub async fn render_tab(tab: Tab, ctx: &ViewContext<'_>) -> String {
    match tab {
        Tab::Dashboard => mounted(DashboardView::new(), ctx).await,
        Tab::Grades => mounted(GradesView::new(), ctx).await,
        Tab::Attendance => mounted(AttendanceView::new(), ctx).await,
        Tab::Calendar => mounted(CalendarView::new(), ctx).await,
        Tab::Weather => mounted(WeatherWidget::new(), ctx).await,
        Tab::Subjects | Tab::Reports | Tab::Settings => render_placeholder(tab),
    }
}

/// Format a percentage with one decimal, e.g. `88.5%`.
pub(crate) fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// `2024-01-15` → `15/1/2024`, the Spanish short date. Anything that is not
/// an ISO date is shown unchanged.
pub(crate) fn short_date(iso: &str) -> String {
    match chrono::NaiveDate::parse_from_str(iso, "%Y-%m-%d") {
        Ok(date) => date.format("%-d/%-m/%Y").to_string(),
        Err(_) => iso.to_string(),
    }
}
