//! Linux demo binary: opens the configured serial device, starts a
//! `Transport` over it, and sends a single bare `AT` probe command,
//! printing whatever final result code comes back. Exercises the
//! `linux-device` feature end to end; a CLI front-end stays out of the
//! library core, so this lives in its own binary target.

use modemlink::core::codec::{Encode, Serializer};
use modemlink::platform::linux_device::LinuxDevice;
use modemlink::protocol::StandardFinalResult;
use modemlink::{urc_pack, DriverConfig, Transport};

urc_pack! {
    /// No application-specific URC shapes registered; everything falls
    /// through to the catch-all.
    #[derive(Debug, Clone, PartialEq)]
    pub enum DemoUrc {
    } catch_all_capacity: 256
}

struct AtProbe;

impl Encode for AtProbe {
    fn encode(&self, ser: &mut Serializer<'_>) {
        ser.tag("AT");
        ser.term(modemlink::core::types::Term::Cr);
    }
}

fn main() {
    env_logger::init();

    let path = DriverConfig::device_path();
    let config = DriverConfig::default();

    let device = LinuxDevice::open(&path).unwrap_or_else(|err| {
        eprintln!("failed to open {path}: {err}");
        std::process::exit(1);
    });

    let transport = Transport::<LinuxDevice, StandardFinalResult, DemoUrc>::start_with_config(
        device,
        |urc: DemoUrc| log::info!(target: "modemlink-linux-demo", "urc: {urc:?}"),
        config.cooldown,
        config.rx_capacity,
        config.tx_capacity,
    );

    match transport.send_command(&AtProbe) {
        Ok(result) => println!("AT -> {result:?}"),
        Err(err) => eprintln!("AT failed: {err}"),
    }

    transport.shut_down();
}
