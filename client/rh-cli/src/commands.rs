use rh_core::{RewardFilter, RewardId};

use clap::Subcommand;

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in with email and password
    Login {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create an account
    Signup {
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Sign out and forget the stored session
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Points, streak, progress and reward counts
    Dashboard,

    /// List rewards
    Rewards {
        #[arg(long, default_value = "all")]
        filter: RewardFilter,
    },

    /// Claim today's streak bonus
    Claim,

    /// Redeem a reward by id
    Redeem { id: RewardId },

    /// Show your referral link and stats
    Referral,

    /// Email a password reset link
    ForgotPassword {
        email: String,
        /// Where the reset link should land
        #[arg(long)]
        redirect_to: Option<String>,
    },

    /// Set a new password (requires a session)
    ResetPassword {
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm: String,
    },
}

impl Commands {
    /// Route the command renders, for the guard.
    pub fn route(&self) -> &'static str {
        match self {
            Self::Login { .. } | Self::Signup { .. } | Self::Logout | Self::Whoami => {
                rh_app::guard::LOGIN_PATH
            }
            Self::ForgotPassword { .. } => rh_app::guard::FORGOT_PASSWORD_PATH,
            Self::ResetPassword { .. } => rh_app::guard::RESET_PASSWORD_PATH,
            Self::Dashboard
            | Self::Rewards { .. }
            | Self::Claim
            | Self::Redeem { .. }
            | Self::Referral => rh_app::guard::HOME_PATH,
        }
    }
}
