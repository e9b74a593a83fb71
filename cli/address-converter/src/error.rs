use primitives_address::Error as AddressError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("Address cannot be empty")]
    EmptyAddress(#[source] AddressError),
    #[error("Invalid Ethereum address: {0}")]
    InvalidEthAddress(#[source] AddressError),
    #[error("Invalid Filecoin delegated address: {0}")]
    InvalidDelegatedAddress(#[source] AddressError),
    #[error(
        "Address is a valid Filecoin address but not a delegated address (f410f/t410f). \
         Only delegated addresses can be converted to Ethereum addresses."
    )]
    NotDelegated,
    #[error("Invalid Filecoin address format: {0}")]
    InvalidAddress(String),
    #[error(
        "Unknown address format. Expected Ethereum address (0x...) or \
         Filecoin delegated address (f410f... or t410f...), got: {0}"
    )]
    UnknownFormat(String),
}

impl Error {
    /// The address error behind this failure, if the codec reported one.
    pub(crate) fn address_error(&self) -> Option<&AddressError> {
        match self {
            Error::EmptyAddress(err)
            | Error::InvalidEthAddress(err)
            | Error::InvalidDelegatedAddress(err) => Some(err),
            Error::NotDelegated | Error::InvalidAddress(_) | Error::UnknownFormat(_) => None,
        }
    }
}
