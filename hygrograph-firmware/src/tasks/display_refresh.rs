//! Display refresh task

use defmt::*;
use embassy_time::Timer;

use hygrograph_core::tasks::DisplayRefresh;

use crate::display::SharedChart;
use crate::SAMPLE_CAPACITY;

/// Display refresh task - copies the whole sample buffer into the chart
#[embassy_executor::task]
pub async fn display_refresh_task(
    mut refresh: DisplayRefresh<'static, SAMPLE_CAPACITY>,
    chart: &'static SharedChart,
) {
    info!("Display refresh task started");

    loop {
        let latest = {
            let mut chart = chart.lock().await;
            refresh.activate(&mut *chart)
        };
        trace!("Chart refreshed (#{}), latest {}", refresh.refreshes(), latest);

        Timer::after_millis(refresh.yield_ms() as u64).await;
    }
}
