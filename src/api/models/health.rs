use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Down,
}

/// 连接池使用情况
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStats {
    pub active: u32,
    pub idle: u32,
    pub max: u32,
}

impl ConnectionStats {
    /// 活跃连接占上限的比例
    pub fn utilization(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.active as f64 / self.max as f64
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlowQuery {
    pub query: String,
    pub mean_ms: f64,
    pub calls: u64,
}

/// 数据库健康指标
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseHealth {
    pub status: HealthStatus,
    pub latency_ms: f64,
    pub connections: ConnectionStats,
    #[serde(default)]
    pub database_size_bytes: u64,
    #[serde(default)]
    pub slow_queries: Vec<SlowQuery>,
    pub checked_at: DateTime<Utc>,
}

/// 单表统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStat {
    pub name: String,
    pub row_count: u64,
    pub size_bytes: u64,
    #[serde(default)]
    pub dead_tuples: u64,
    #[serde(default)]
    pub last_vacuum_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_snapshot_parses_from_backend_json() {
        let body = r#"{
            "status": "degraded",
            "latencyMs": 41.5,
            "connections": { "active": 18, "idle": 2, "max": 20 },
            "checkedAt": "2026-03-01T10:00:00Z"
        }"#;
        let health: DatabaseHealth = serde_json::from_str(body).unwrap();
        assert_eq!(health.status, HealthStatus::Degraded);
        assert!(health.slow_queries.is_empty());
        assert!((health.connections.utilization() - 0.9).abs() < f64::EPSILON);
    }
}
