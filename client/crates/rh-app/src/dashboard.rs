use crate::{AppContext, AppError, AppResult};

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use log::debug;
use rh_cache::QueryKey;
use rh_core::{
    AuthUser, ClaimOutcome, GIFT_CARD_GOAL_POINTS, Profile, RedeemOutcome, Reward, RewardCounts,
    RewardFilter, RewardId, RewardStatus, filter_rewards, is_claimed_today,
    points_progress_percent, referral_link, reward_status, weekday_index,
};
use serde::Serialize;

const CLAIM_MUTATION: &str = "daily claim";
const REDEEM_MUTATION: &str = "redemption";

/// A reward with its status against the current balance.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RewardView {
    #[serde(flatten)]
    pub reward: Reward,
    pub status: RewardStatus,
}

/// Everything the dashboard renders, derived from the latest cached
/// profile and rewards.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub profile: Profile,
    pub filter: RewardFilter,
    pub rewards: Vec<RewardView>,
    pub counts: RewardCounts,
    pub is_claimed_today: bool,
    pub goal_points: u64,
    pub progress_percent: u8,
    pub weekday_index: usize,
    pub referral_link: String,
    pub claim_pending: bool,
    pub redeem_pending: bool,
}

impl DashboardView {
    pub fn build(
        profile: Profile,
        rewards: &[Reward],
        filter: RewardFilter,
        referral_base_url: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let balance = profile.points_balance;
        let visible = filter_rewards(rewards, balance, filter)
            .into_iter()
            .map(|reward| RewardView {
                reward: reward.clone(),
                status: reward_status(reward, balance),
            })
            .collect();

        Self {
            filter,
            rewards: visible,
            counts: RewardCounts::from_rewards(rewards, balance),
            is_claimed_today: is_claimed_today(profile.last_check_in, now),
            goal_points: GIFT_CARD_GOAL_POINTS,
            progress_percent: points_progress_percent(balance, GIFT_CARD_GOAL_POINTS),
            weekday_index: weekday_index(now),
            referral_link: referral_link(referral_base_url, profile.first_name.as_deref()),
            claim_pending: false,
            redeem_pending: false,
            profile,
        }
    }
}

/// Clears its flag when the mutation finishes, however it finishes.
struct PendingGuard<'a>(&'a AtomicBool);

impl<'a> PendingGuard<'a> {
    fn acquire(flag: &'a AtomicBool, mutation: &'static str) -> AppResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| Self(flag))
            .map_err(|_| AppError::mutation_pending(mutation))
    }
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Reads and mutations behind the dashboard.
pub struct DashboardController {
    ctx: Arc<AppContext>,
    claim_pending: AtomicBool,
    redeem_pending: AtomicBool,
}

impl DashboardController {
    pub fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            claim_pending: AtomicBool::new(false),
            redeem_pending: AtomicBool::new(false),
        }
    }

    pub fn is_claim_pending(&self) -> bool {
        self.claim_pending.load(Ordering::Acquire)
    }

    pub fn is_redeem_pending(&self) -> bool {
        self.redeem_pending.load(Ordering::Acquire)
    }

    pub async fn profile(&self) -> AppResult<Profile> {
        let user = self.current_user().await?;
        let remote = self.ctx.remote().clone();

        let profile = self
            .ctx
            .profiles()
            .read(QueryKey::profile(user.id), move || async move {
                remote.fetch_profile(user.id).await.map_err(Arc::new)
            })
            .await?;
        Ok(profile)
    }

    pub async fn rewards(&self) -> AppResult<Vec<Reward>> {
        let remote = self.ctx.remote().clone();

        let rewards = self
            .ctx
            .rewards()
            .read(QueryKey::Rewards, move || async move {
                remote.fetch_rewards().await.map_err(Arc::new)
            })
            .await?;
        Ok(rewards)
    }

    pub async fn view(&self, filter: RewardFilter) -> AppResult<DashboardView> {
        self.view_at(filter, Utc::now()).await
    }

    pub async fn view_at(&self, filter: RewardFilter, now: DateTime<Utc>) -> AppResult<DashboardView> {
        let (profile, rewards) = tokio::try_join!(self.profile(), self.rewards())?;

        let mut view = DashboardView::build(
            profile,
            &rewards,
            filter,
            &self.ctx.settings().referral_base_url,
            now,
        );
        view.claim_pending = self.is_claim_pending();
        view.redeem_pending = self.is_redeem_pending();
        Ok(view)
    }

    pub async fn claim_daily_streak(&self) -> AppResult<ClaimOutcome> {
        self.claim_daily_streak_at(Utc::now()).await
    }

    /// Claim today's streak bonus.
    ///
    /// Refused locally while a claim is pending or once today's check-in is
    /// recorded. A business rejection is returned as `Ok` and leaves the
    /// cached profile alone; a transport failure invalidates it, since the
    /// claim may have landed.
    pub async fn claim_daily_streak_at(&self, now: DateTime<Utc>) -> AppResult<ClaimOutcome> {
        let _pending = self.begin(&self.claim_pending, CLAIM_MUTATION)?;

        let profile = self.profile().await.inspect_err(|e| self.report(e))?;
        if is_claimed_today(profile.last_check_in, now) {
            return Err(self.refuse(AppError::already_claimed_today()));
        }

        match self.ctx.remote().claim_daily_streak().await {
            Ok(ClaimOutcome::Claimed { new_balance }) => {
                self.ctx
                    .notifier()
                    .success(format!("+{new_balance} Points!"));
                self.invalidate_profile(profile.id).await;
                Ok(ClaimOutcome::Claimed { new_balance })
            }
            Ok(ClaimOutcome::Rejected { message }) => {
                self.ctx.notifier().error(message.as_str());
                Ok(ClaimOutcome::Rejected { message })
            }
            Err(e) => {
                self.ctx.notifier().error(e.message());
                self.invalidate_profile(profile.id).await;
                Err(e.into())
            }
        }
    }

    /// Redeem a reward.
    ///
    /// Refused locally while a redemption is pending, and for rewards that
    /// are locked or coming soon. Only a successful redemption invalidates
    /// the cached profile.
    pub async fn redeem_reward(&self, reward_id: RewardId) -> AppResult<RedeemOutcome> {
        let _pending = self.begin(&self.redeem_pending, REDEEM_MUTATION)?;

        let (profile, rewards) = tokio::try_join!(self.profile(), self.rewards())
            .inspect_err(|e| self.report(e))?;

        let Some(reward) = rewards.iter().find(|reward| reward.id == reward_id) else {
            return Err(self.refuse(AppError::reward_not_found(reward_id)));
        };

        let status = reward_status(reward, profile.points_balance);
        if !status.is_redeemable() {
            return Err(self.refuse(AppError::reward_unavailable(reward_id, status)));
        }

        match self.ctx.remote().redeem_reward(reward_id).await {
            Ok(RedeemOutcome::Redeemed { new_balance }) => {
                self.ctx.notifier().success("Reward Redeemed!");
                self.invalidate_profile(profile.id).await;
                Ok(RedeemOutcome::Redeemed { new_balance })
            }
            Ok(RedeemOutcome::Rejected { message }) => {
                self.ctx.notifier().error(message.as_str());
                Ok(RedeemOutcome::Rejected { message })
            }
            Err(e) => {
                self.ctx.notifier().error(e.message());
                Err(e.into())
            }
        }
    }

    async fn current_user(&self) -> AppResult<AuthUser> {
        self.ctx
            .sync_identity()
            .await
            .ok_or_else(AppError::not_authenticated)
    }

    fn begin<'a>(&self, flag: &'a AtomicBool, mutation: &'static str) -> AppResult<PendingGuard<'a>> {
        PendingGuard::acquire(flag, mutation).inspect_err(|e| self.report(e))
    }

    async fn invalidate_profile(&self, user_id: uuid::Uuid) {
        debug!("Invalidating profile after mutation");
        self.ctx.profiles().invalidate(QueryKey::profile(user_id)).await;
    }

    fn refuse(&self, err: AppError) -> AppError {
        self.report(&err);
        err
    }

    fn report(&self, err: &AppError) {
        self.ctx.notifier().error(err.user_message());
    }
}
