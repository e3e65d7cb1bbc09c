#![no_std]
#![no_main]

use defmt::{error, info};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::USB;
use embassy_rp::usb::Driver;
use embassy_usb::class::hid::State;
use embassy_usb::{Builder, Config as UsbConfig};
use static_cell::StaticCell;
use switch_macro_pad::{configure_usb_hid, UsbReportSink};

#[cfg(feature = "demo-macros")]
use embassy_time::{Delay, Timer};
#[cfg(feature = "demo-macros")]
use switch_macro_pad::{demo, Sequencer, SwitchController};

#[cfg(feature = "serial-passthrough")]
use embassy_rp::peripherals::UART1;
#[cfg(feature = "serial-passthrough")]
use embassy_rp::uart::{Config as UartConfig, Uart};
#[cfg(feature = "serial-passthrough")]
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
#[cfg(feature = "serial-passthrough")]
use embassy_sync::signal::Signal;
#[cfg(feature = "serial-passthrough")]
use switch_macro_pad::{RawReportSource, ReportSink, SwitchReport};

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

#[cfg(feature = "serial-passthrough")]
bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

#[cfg(not(feature = "serial-passthrough"))]
bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => embassy_rp::usb::InterruptHandler<USB>;
});

/// Signal for passing raw reports from input to output task.
/// Using Signal instead of Channel provides "latest value wins" semantics,
/// which is appropriate for pad state where we only care about the most recent input.
#[cfg(feature = "serial-passthrough")]
static REPORT_SIGNAL: StaticCell<Signal<CriticalSectionRawMutex, SwitchReport>> = StaticCell::new();

/// USB device configuration buffers.
static CONFIG_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static BOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static MSOS_DESCRIPTOR: StaticCell<[u8; 256]> = StaticCell::new();
static CONTROL_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// HID state.
static HID_STATE: StaticCell<State> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Switch macro pad starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    // --- USB Setup ---
    let usb_driver = Driver::new(p.USB, Irqs);

    let mut usb_config = UsbConfig::new(0x0F0D, 0x0092); // HORI Pokken pad VID/PID
    usb_config.manufacturer = Some("HORI CO.,LTD.");
    usb_config.product = Some("POKKEN CONTROLLER");
    usb_config.serial_number = Some("001");
    usb_config.max_power = 100;
    usb_config.max_packet_size_0 = 64;

    let config_descriptor = CONFIG_DESCRIPTOR.init([0; 256]);
    let bos_descriptor = BOS_DESCRIPTOR.init([0; 256]);
    let msos_descriptor = MSOS_DESCRIPTOR.init([0; 256]);
    let control_buf = CONTROL_BUF.init([0; 64]);

    let mut builder = Builder::new(
        usb_driver,
        usb_config,
        config_descriptor,
        bos_descriptor,
        msos_descriptor,
        control_buf,
    );

    // Configure HID class
    let hid_state = HID_STATE.init(State::new());
    let hid_writer = configure_usb_hid(&mut builder, hid_state);

    // Build the USB device
    let usb_device = builder.build();

    // Create output
    let usb_sink = UsbReportSink::new(hid_writer);

    // Optional: LED for error indication (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(usb_task(usb_device)).unwrap();

    #[cfg(feature = "demo-macros")]
    {
        let sequencer = Sequencer::new(SwitchController::new(usb_sink), Delay);
        spawner.spawn(macro_task(sequencer, led)).unwrap();
    }

    #[cfg(feature = "serial-passthrough")]
    {
        // Initialize the report signal (latest-value semantics)
        let signal = REPORT_SIGNAL.init(Signal::new());

        let mut uart_config = UartConfig::default();
        uart_config.baudrate = 115_200;

        #[cfg(not(feature = "uart-flow-control"))]
        let uart = Uart::new(
            p.UART1,
            p.PIN_8, // TX
            p.PIN_9, // RX
            Irqs,
            p.DMA_CH0,
            p.DMA_CH1,
            uart_config,
        );
        #[cfg(feature = "uart-flow-control")]
        let uart = Uart::new_with_rtscts(
            p.UART1,
            p.PIN_8,  // TX
            p.PIN_9,  // RX
            p.PIN_11, // RTS
            p.PIN_10, // CTS
            Irqs,
            p.DMA_CH0,
            p.DMA_CH1,
            uart_config,
        );
        let (_tx, rx) = uart.split();

        spawner.spawn(input_task(RawReportSource::new(rx), signal, led)).unwrap();
        spawner.spawn(output_task(usb_sink, signal)).unwrap();
    }

    info!("Switch macro pad initialized");
}

/// USB device task - runs the USB stack.
#[embassy_executor::task]
async fn usb_task(mut device: embassy_usb::UsbDevice<'static, Driver<'static, USB>>) {
    device.run().await;
}

/// Macro task - loops the demonstration script through the sequencer.
#[cfg(feature = "demo-macros")]
#[embassy_executor::task]
async fn macro_task(
    mut sequencer: Sequencer<SwitchController<UsbReportSink<'static>>, Delay>,
    mut led: Output<'static>,
) {
    // Wait for USB to be ready
    sequencer.controller_mut().sink_mut().wait_ready().await;
    info!("USB HID ready, running macro script...");

    loop {
        if let Err(e) = demo::run(&mut sequencer).await {
            error!("Macro error: {:?}", e);
            // Toggle LED to indicate error
            led.toggle();
        }
        Timer::after_millis(2_000).await;
    }
}

/// Input task - reads raw report frames from UART and signals the latest.
#[cfg(feature = "serial-passthrough")]
#[embassy_executor::task]
async fn input_task(
    mut input: RawReportSource<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, SwitchReport>,
    mut led: Output<'static>,
) {
    loop {
        match input.receive().await {
            Ok(report) => {
                // Signal the latest report (overwrites any pending value)
                signal.signal(report);
            }
            Err(e) => {
                error!("Input error: {:?}", e);
                // Signal neutral state to prevent stale inputs
                signal.signal(SwitchReport::neutral());
                // Toggle LED to indicate error
                led.toggle();
            }
        }
    }
}

/// Output task - waits for report signals and sends them to USB HID.
#[cfg(feature = "serial-passthrough")]
#[embassy_executor::task]
async fn output_task(
    mut output: UsbReportSink<'static>,
    signal: &'static Signal<CriticalSectionRawMutex, SwitchReport>,
) {
    // Wait for USB to be ready
    output.wait_ready().await;
    info!("USB HID ready, forwarding raw reports...");

    loop {
        // Wait for the next report (blocks until signaled)
        let report = signal.wait().await;
        if let Err(e) = output.send(&report).await {
            error!("Output error: {:?}", e);
        }
    }
}
