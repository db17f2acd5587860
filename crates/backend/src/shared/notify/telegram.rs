use serde_json::json;

use crate::shared::config;

/// Отправка уведомления менеджерам в Telegram.
///
/// Fire-and-forget: сбой доставки логируется и не влияет на бизнес-операцию.
pub fn notify(text: String) {
    let cfg = config::get_config().telegram.clone();
    if !cfg.enabled || cfg.bot_token.is_empty() || cfg.chat_id.is_empty() {
        tracing::debug!("telegram notifications disabled, skipping: {}", text);
        return;
    }

    tokio::spawn(async move {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", cfg.bot_token);
        let body = json!({
            "chat_id": cfg.chat_id,
            "text": text,
            "parse_mode": "HTML",
        });

        match reqwest::Client::new().post(&url).json(&body).send().await {
            Ok(resp) if resp.status().is_success() => {}
            Ok(resp) => {
                tracing::warn!("telegram sendMessage returned {}", resp.status());
            }
            Err(err) => {
                tracing::warn!("telegram sendMessage failed: {}", err);
            }
        }
    });
}

/// Текст уведомления о новой заявке.
pub fn new_application_message(
    application_id: uuid::Uuid,
    car_title: &str,
    final_price: &str,
) -> String {
    format!(
        "🚗 Новая заявка\nАвто: {}\nЦена: {} USD\nID: {}",
        car_title, final_price, application_id
    )
}
