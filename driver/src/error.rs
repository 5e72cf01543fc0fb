use kernel::KernelError;

/// Maps a backend failure onto the kernel error kinds.
pub(crate) trait ConvertError {
    type Ok;
    fn convert_error(self) -> error_stack::Result<Self::Ok, KernelError>;
}
