//! Hygrograph - Temperature/Humidity Chart Firmware
//!
//! Main firmware binary for RP2040 boards with a DHT22 sensor and an
//! SSD1306 OLED. Samples the sensor every couple of seconds into a ring
//! buffer and draws the history as a scrolling chart.
//!
//! Core 0 brings up the peripherals and then only logs a heartbeat. The
//! three working tasks (acquisition, display refresh, graphics tick) run
//! on an executor pinned to core 1, spawned in priority order.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::{Executor, Spawner};
use embassy_rp::gpio::{Level, OutputOpenDrain};
use embassy_rp::i2c::I2c;
use embassy_rp::multicore::{spawn_core1, Stack};
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use hygrograph_core::buffer::{SampleBuffer, SampleReader, SampleWriter};
use hygrograph_core::config::AppConfig;
use hygrograph_core::scheduler::{core_stack_bytes, TaskId, TASK_TABLE};
use hygrograph_core::tasks::{Acquisition, DisplayRefresh, GraphicsTick};
use hygrograph_drivers::Dht22;

use crate::display::SharedChart;
use crate::tasks::{now_ms, Sensor};

mod config;
mod display;
mod tasks;

/// Number of samples kept (and plotted)
pub const SAMPLE_CAPACITY: usize = 64;

/// Core 1 stack: the summed budget of the tasks pinned there
const CORE1_STACK_BYTES: usize = core_stack_bytes(1);

/// Heartbeat interval of the core 0 loop
const HEARTBEAT_SECS: u64 = 60;

// Static cells (must live forever for task references)
static APP_CONFIG: StaticCell<AppConfig> = StaticCell::new();
static SAMPLES: StaticCell<SampleBuffer<SAMPLE_CAPACITY>> = StaticCell::new();
static CHART: StaticCell<SharedChart> = StaticCell::new();
static CORE1_STACK: StaticCell<Stack<CORE1_STACK_BYTES>> = StaticCell::new();
static EXECUTOR1: StaticCell<Executor> = StaticCell::new();

/// Everything the core 1 tasks own, handed over before they are spawned
struct TaskSet {
    acquisition: Option<(Acquisition<Sensor>, SampleWriter<'static, SAMPLE_CAPACITY>)>,
    refresh: Option<DisplayRefresh<'static, SAMPLE_CAPACITY>>,
    tick: Option<GraphicsTick>,
    chart: &'static SharedChart,
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Hygrograph firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config: &'static AppConfig = APP_CONFIG.init(config::load_embedded());

    // One producer (acquisition), any number of readers
    let samples = SAMPLES.init(SampleBuffer::new());
    let (writer, reader) = samples.split();
    info!("Sample buffer ready ({} slots)", SAMPLE_CAPACITY);

    // DHT22 data line with external pull-up
    // Pin assignment is board-specific (GPIO15)
    let dht_pin = OutputOpenDrain::new(p.PIN_15, Level::High);
    let acquisition = unwrap!(Acquisition::begin(
        Dht22::new(dht_pin, Delay),
        &config.acquisition,
        now_ms()
    ));
    info!("DHT22 initialized");

    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, display::i2c_config());
    let chart = display::init_chart(i2c, &config.chart);
    let chart: &'static SharedChart = CHART.init(Mutex::new(chart));

    let set = TaskSet {
        acquisition: Some((acquisition, writer)),
        refresh: Some(DisplayRefresh::new(reader, &config.refresh)),
        tick: Some(GraphicsTick::new(&config.graphics, now_ms())),
        chart,
    };

    let stack = CORE1_STACK.init_with(Stack::new);
    spawn_core1(p.CORE1, stack, move || {
        let executor = EXECUTOR1.init(Executor::new());
        executor.run(|spawner| spawn_tasks(spawner, set))
    });

    info!("Core 1 started, firmware running");

    heartbeat(reader, chart).await
}

/// Spawn the core 1 tasks, highest priority first
fn spawn_tasks(spawner: Spawner, mut set: TaskSet) {
    for spec in TASK_TABLE.iter() {
        info!(
            "Spawning {} (priority {}, core {}, {} byte stack)",
            spec.name, spec.priority, spec.core, spec.stack_bytes
        );

        match spec.id {
            TaskId::Acquisition => {
                if let Some((acquisition, writer)) = set.acquisition.take() {
                    spawner.spawn(unwrap!(tasks::acquisition_task(acquisition, writer)));
                }
            }
            TaskId::DisplayRefresh => {
                if let Some(refresh) = set.refresh.take() {
                    spawner.spawn(unwrap!(tasks::display_refresh_task(refresh, set.chart)));
                }
            }
            TaskId::GraphicsTick => {
                if let Some(tick) = set.tick.take() {
                    spawner.spawn(unwrap!(tasks::graphics_tick_task(tick, set.chart)));
                }
            }
        }
    }

    info!("All tasks spawned");
}

/// Core 0 has nothing else to do; report progress now and then
async fn heartbeat(samples: SampleReader<'static, SAMPLE_CAPACITY>, chart: &'static SharedChart) -> ! {
    loop {
        Timer::after_secs(HEARTBEAT_SECS).await;

        let frames = chart.lock().await.frames();
        trace!(
            "Main loop heartbeat: cursor {}, latest {}, {} frames",
            samples.cursor(),
            samples.latest(),
            frames
        );
    }
}
