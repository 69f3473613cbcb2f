use crate::config::KarmaConfig;
use crate::error::{AppError, AppResult};
use crate::services::line_detection::LineType;
use reqwest::Client;
use serde::Serialize;

/// 发给下游积分服务的奖励事件
#[derive(Debug, Clone, Serialize)]
pub struct RewardIssuedEvent {
    pub user_id: i64,
    pub line_types: Vec<LineType>,
}

const MAX_ATTEMPTS: u32 = 3;

#[derive(Clone)]
pub struct KarmaService {
    client: Client,
    config: KarmaConfig,
}

impl KarmaService {
    pub fn new(config: KarmaConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// 推送 reward_issued 事件, 自带有限重试
    ///
    /// 奖励行在调用前已提交, 这里失败只影响积分入账, 由下游自行补偿;
    /// 未配置 base_url 时 (本地/测试) 直接跳过
    pub async fn notify_reward_issued(
        &self,
        user_id: i64,
        line_types: &[LineType],
    ) -> AppResult<()> {
        if self.config.base_url.is_empty() {
            log::debug!("Karma service not configured, skipping reward_issued for user {user_id}");
            return Ok(());
        }

        let url = format!(
            "{}/events/reward_issued",
            self.config.base_url.trim_end_matches('/')
        );
        let event = RewardIssuedEvent {
            user_id,
            line_types: line_types.to_vec(),
        };

        let mut last_error = String::new();
        for attempt in 1..=MAX_ATTEMPTS {
            let mut request = self.client.post(&url).json(&event);
            if !self.config.api_key.is_empty() {
                request = request.bearer_auth(&self.config.api_key);
            }

            match request.send().await {
                Ok(response) if response.status().is_success() => {
                    log::info!("reward_issued event delivered for user {user_id}");
                    return Ok(());
                }
                Ok(response) => {
                    let status = response.status();
                    let body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    log::warn!("Karma service returned {status} on attempt {attempt}: {body}");
                    last_error = format!("{status}: {body}");
                }
                Err(e) => {
                    log::warn!("Karma service request failed on attempt {attempt}: {e}");
                    last_error = e.to_string();
                }
            }

            if attempt < MAX_ATTEMPTS {
                tokio::time::sleep(std::time::Duration::from_secs(1)).await;
            }
        }

        Err(AppError::ExternalApiError(format!(
            "reward_issued delivery failed after {MAX_ATTEMPTS} attempts: {last_error}"
        )))
    }
}
