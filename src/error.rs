//! Unified error handling for relayd.
//!
//! Every command failure is a [`HandlerError`]. Each variant belongs to one
//! [`ErrorKind`], which decides what happens to the connection after the
//! error reply is sent.

use thiserror::Error;

/// Coarse classification of handler failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or unknown input. Reply, keep the connection.
    Protocol,
    /// Bad connection password. Reply, then close the connection.
    Auth,
    /// Command issued out of sequence. Reply, no state change.
    State,
    /// Caller lacks operator authority. Reply, no state change.
    Permission,
    /// Target nickname or channel does not exist.
    NotFound,
    /// Name already taken or role already held.
    Conflict,
    /// Caller is banned from the target channel.
    Forbidden,
    /// Channel password mismatch.
    BadKey,
}

// ============================================================================
// Handler Errors (command processing)
// ============================================================================

/// Errors that can occur during command handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unknown command {0}")]
    UnknownCommand(String),

    #[error("Erroneous nickname {0}")]
    ErroneousNickname(String),

    #[error("Invalid channel name {0}")]
    InvalidChannelName(String),

    #[error("Line too long")]
    LineTooLong,

    #[error("Invalid password")]
    PasswordMismatch,

    #[error("You must log in with PASS first")]
    NotAuthenticated,

    #[error("You must set a nickname first with NICK")]
    NoNickname,

    #[error("You must register first with USER")]
    NotRegistered,

    #[error("You are already authenticated")]
    AlreadyAuthenticated,

    #[error("You may not reregister")]
    AlreadyRegistered,

    #[error("You are already in channel {0}, LEAVE it first")]
    AlreadyInChannel(String),

    #[error("You are not on a channel")]
    NotOnChannel,

    #[error("Permission denied: you are not a channel operator")]
    ChanOpPrivsNeeded,

    #[error("You cannot make yourself op")]
    SelfPromotion,

    #[error("You cannot kick yourself")]
    SelfKick,

    #[error("Permission denied: you are not a server operator")]
    NoPrivileges,

    #[error("Invalid operator credentials")]
    OperCredentials,

    #[error("No such nick {0}")]
    NoSuchNick(String),

    #[error("Channel {0} does not exist")]
    NoSuchChannel(String),

    #[error("User {0} not found in this channel")]
    UserNotInChannel(String),

    #[error("No available channels")]
    NoChannels,

    #[error("Nickname {0} is already in use")]
    NicknameInUse(String),

    #[error("Channel {0} already exists")]
    ChannelExists(String),

    #[error("{0} is already an operator")]
    AlreadyOperator(String),

    #[error("You have been banned from channel {0}")]
    BannedFromChan(String),

    #[error("Invalid password for channel {0}")]
    BadChannelKey(String),
}

impl HandlerError {
    /// The taxonomy bucket this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Usage(_)
            | Self::UnknownCommand(_)
            | Self::ErroneousNickname(_)
            | Self::InvalidChannelName(_)
            | Self::LineTooLong => ErrorKind::Protocol,
            Self::PasswordMismatch => ErrorKind::Auth,
            Self::NotAuthenticated
            | Self::NoNickname
            | Self::NotRegistered
            | Self::AlreadyAuthenticated
            | Self::AlreadyRegistered
            | Self::AlreadyInChannel(_)
            | Self::NotOnChannel => ErrorKind::State,
            Self::ChanOpPrivsNeeded
            | Self::SelfPromotion
            | Self::SelfKick
            | Self::NoPrivileges
            | Self::OperCredentials => ErrorKind::Permission,
            Self::NoSuchNick(_)
            | Self::NoSuchChannel(_)
            | Self::UserNotInChannel(_)
            | Self::NoChannels => ErrorKind::NotFound,
            Self::NicknameInUse(_) | Self::ChannelExists(_) | Self::AlreadyOperator(_) => {
                ErrorKind::Conflict
            }
            Self::BannedFromChan(_) => ErrorKind::Forbidden,
            Self::BadChannelKey(_) => ErrorKind::BadKey,
        }
    }

    /// Get a static error code string for log labeling.
    #[inline]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Usage(_) => "usage",
            Self::UnknownCommand(_) => "unknown_command",
            Self::ErroneousNickname(_) => "erroneous_nickname",
            Self::InvalidChannelName(_) => "invalid_channel_name",
            Self::LineTooLong => "line_too_long",
            Self::PasswordMismatch => "password_mismatch",
            Self::NotAuthenticated => "not_authenticated",
            Self::NoNickname => "no_nickname",
            Self::NotRegistered => "not_registered",
            Self::AlreadyAuthenticated => "already_authenticated",
            Self::AlreadyRegistered => "already_registered",
            Self::AlreadyInChannel(_) => "already_in_channel",
            Self::NotOnChannel => "not_on_channel",
            Self::ChanOpPrivsNeeded => "chanop_privs_needed",
            Self::SelfPromotion => "self_promotion",
            Self::SelfKick => "self_kick",
            Self::NoPrivileges => "no_privileges",
            Self::OperCredentials => "oper_credentials",
            Self::NoSuchNick(_) => "no_such_nick",
            Self::NoSuchChannel(_) => "no_such_channel",
            Self::UserNotInChannel(_) => "user_not_in_channel",
            Self::NoChannels => "no_channels",
            Self::NicknameInUse(_) => "nickname_in_use",
            Self::ChannelExists(_) => "channel_exists",
            Self::AlreadyOperator(_) => "already_operator",
            Self::BannedFromChan(_) => "banned_from_chan",
            Self::BadChannelKey(_) => "bad_channel_key",
        }
    }

    /// Whether the connection must be closed after the reply is sent.
    #[inline]
    pub fn closes_connection(&self) -> bool {
        self.kind() == ErrorKind::Auth
    }

    /// Render the client-visible reply line (without terminator).
    pub fn to_reply(&self, prefix: &str) -> String {
        format!("{prefix}ERROR :{self}")
    }
}

/// Result type for command handlers.
pub type HandlerResult = Result<(), HandlerError>;
