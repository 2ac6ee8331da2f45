/// Represents the physical location where tensor data is stored.
///
/// All computation currently targets the CPU; the GPU variant exists so that
/// device placement is part of the tensor contract (and of the error type)
/// before an accelerator backend lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StorageDevice {
    /// Data is stored in main system memory (RAM). The default device.
    #[default]
    CPU,
    /// Placeholder for accelerator-resident data.
    GPU,
}
