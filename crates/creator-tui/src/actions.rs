use anyhow::Result;
use creator_core::dashboard::{overview, revenue_breakdown, views_series, ViewsPoint};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::app::{App, DashboardData, Mode, SeriesSettings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    LoadDashboard,
    RefreshViews,
}

pub fn execute_action(app: &mut App, action: Action) -> Result<()> {
    if app.mode != Mode::Dashboard {
        return Ok(());
    }
    match action {
        Action::LoadDashboard => {
            let views = generate_views(&app.series)?;
            app.apply_dashboard(DashboardData {
                overview: Some(overview()),
                revenue: revenue_breakdown(),
                views,
            });
        }
        Action::RefreshViews => {
            let views = generate_views(&app.series)?;
            app.apply_views(views);
            app.set_status("Views refreshed");
        }
    }
    Ok(())
}

fn generate_views(series: &SeriesSettings) -> Result<Vec<ViewsPoint>> {
    let mut rng = StdRng::from_entropy();
    Ok(views_series(&mut rng, series.start, series.days)?)
}
