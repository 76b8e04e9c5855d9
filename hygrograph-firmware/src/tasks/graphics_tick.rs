//! Graphics engine tick task

use defmt::*;
use embassy_time::Timer;

use hygrograph_core::tasks::{GraphicsTick, TickOutcome};

use super::now_ms;
use crate::display::SharedChart;

/// Graphics tick task - lets the chart engine redraw and flush
///
/// Only the first error of a run of failures is logged; the tick runs
/// every few milliseconds.
#[embassy_executor::task]
pub async fn graphics_tick_task(mut tick: GraphicsTick, chart: &'static SharedChart) {
    info!("Graphics tick task started");

    let mut failing = false;

    loop {
        let outcome = {
            let mut chart = chart.lock().await;
            tick.activate(now_ms(), &mut *chart)
        };

        match outcome {
            TickOutcome::NotDue => {}
            TickOutcome::Processed => {
                if failing {
                    info!("Chart rendering recovered");
                    failing = false;
                }
            }
            TickOutcome::Failed(e) => {
                if !failing {
                    warn!("Chart rendering failed: {}", e);
                    failing = true;
                }
            }
        }

        Timer::after_millis(tick.yield_ms() as u64).await;
    }
}
