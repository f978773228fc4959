// Domain models

mod cpu;
mod neighbor;
mod network;
mod report;

pub use cpu::CpuSample;
pub use neighbor::{NeighborEntry, Resolution};
pub use network::{AddressBook, InterfaceState, InterfaceStatus};
pub use report::{DeviceReport, Report};
