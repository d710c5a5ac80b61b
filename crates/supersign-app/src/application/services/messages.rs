//! Pure builders for the outbound push messages. Formatting only; the
//! dispatcher applies the transport size limits before delivery.

use chrono::{DateTime, Utc};

use supersign_domain::checkin::RunSummary;
use supersign_domain::notification::PushMessage;

/// Failed-item lines rendered in a report, at most.
const MAX_FAILED_LINES: usize = 20;
/// Per-topic detail column width, in characters.
const MAX_DETAIL_CHARS: usize = 40;

/// Checkin-report message: summary table plus per-topic breakdown.
pub fn build_checkin_message(
    account_name: &str,
    cookie_valid: bool,
    summary: &RunSummary,
    now: DateTime<Utc>,
) -> PushMessage {
    let title = if summary.total == 0 {
        format!("签到·{}·无超话", account_name)
    } else if summary.failed == 0 {
        format!("签到·{}·全部完成", account_name)
    } else {
        format!("签到·{}·{}个失败", account_name, summary.failed)
    };

    let cookie_status = if cookie_valid { "有效" } else { "失效" };
    let mut desp = format!(
        "### 签到任务结果\n\n\
         | 项目 | 值 |\n\
         |------|------|\n\
         | 账号 | `{}` |\n\
         | 时间 | `{}` |\n\
         | Cookie | `{}` |\n\
         | 总超话 | **{}** |\n\
         | ✅ 新签到 | **{}** |\n\
         | ☑️ 已签到 | **{}** |\n\
         | ❌ 失败 | **{}** |\n",
        account_name,
        now.format("%Y-%m-%d %H:%M UTC"),
        cookie_status,
        summary.total,
        summary.success,
        summary.already,
        summary.failed,
    );

    if !summary.details.is_empty() {
        desp.push_str("\n### 超话签到明细\n\n");
        desp.push_str("| 序号 | 超话名称 | 状态 | 说明 |\n");
        desp.push_str("|------|----------|------|------|\n");
        for (i, item) in summary.details.iter().enumerate() {
            desp.push_str(&format!(
                "| {} | {} | {} {} | {} |\n",
                i + 1,
                item.name,
                item.status.icon(),
                item.status.as_str(),
                truncate_chars(&item.detail, MAX_DETAIL_CHARS),
            ));
        }
    } else if summary.total == 0 {
        desp.push_str("\n> ⚠️ 未获取到任何关注的超话。\n");
        desp.push_str("> 可能原因：Cookie 已过期、未关注超话、或微博 API 参数配置不正确。\n");
    }

    if !summary.failed_items.is_empty() {
        desp.push_str("\n### ❌ 失败详情\n\n");
        for item in summary.failed_items.iter().take(MAX_FAILED_LINES) {
            desp.push_str(&format!("- {}\n", item));
        }
    }

    PushMessage::new(title, desp)
}

/// Credential-invalid alert asking for a re-upload.
pub fn build_cookie_invalid_message(account_name: &str, now: DateTime<Utc>) -> PushMessage {
    let title = format!("⚠️ Cookie失效 - {}", account_name);
    let desp = format!(
        "### Cookie 失效告警\n\n\
         - 账号: `{}`\n\
         - 时间: `{}`\n\
         - 状态: `INVALID`\n\n\
         请尽快使用客户端重新上传 Cookie。",
        account_name,
        now.format("%Y-%m-%d %H:%M:%S UTC"),
    );
    PushMessage::new(title, desp)
}

/// Confirmation after the harvesting tool uploads a fresh bundle.
pub fn build_cookie_update_message(
    account_name: &str,
    success: bool,
    detail: &str,
    now: DateTime<Utc>,
) -> PushMessage {
    let status = if success { "成功" } else { "失败" };
    let title = format!("Cookie更新{} - {}", status, account_name);
    let mut desp = format!(
        "### Cookie 更新通知\n\n\
         - 账号: `{}`\n\
         - 时间: `{}`\n\
         - 状态: `{}`\n",
        account_name,
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        status,
    );
    if !detail.is_empty() {
        desp.push_str(&format!("- 详情: {}\n", detail));
    }
    PushMessage::new(title, desp)
}

/// Minimal fixed message for the operator's push-channel probe.
pub fn build_test_message() -> PushMessage {
    PushMessage::new(
        "supersign 测试推送",
        "如果您收到此消息，说明推送通道配置成功。",
    )
}

fn truncate_chars(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
