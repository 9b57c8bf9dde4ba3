pub mod models;

use std::fmt;

use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::error::{FundtrackError, Result};

pub use models::{NewFund, RecordKind, TransactionRecord};

/// The four backend calls, used to label failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FundOperation {
    ListFunds,
    FetchEstimate,
    AddFund,
    AddRecord,
}

impl fmt::Display for FundOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::ListFunds => "获取基金列表失败",
            Self::FetchEstimate => "获取基金估值失败",
            Self::AddFund => "添加基金失败",
            Self::AddRecord => "添加交易记录失败",
        };
        f.write_str(message)
    }
}

/// HTTP client for the fund-tracking backend.
///
/// Fund codes and payloads are passed through untouched; the backend owns
/// their shape.
#[derive(Debug, Clone)]
pub struct FundClient {
    client: Client,
    base_url: String,
}

impl FundClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Overview of every tracked fund
    pub async fn get_funds(&self) -> Result<Value> {
        let url = format!("{}/funds/overview", self.base_url);
        self.execute(FundOperation::ListFunds, self.client.get(url))
            .await
    }

    /// Live estimated valuation for one fund
    pub async fn get_fund_estimate(&self, fund_code: &str) -> Result<Value> {
        let url = format!("{}/funds/{}/estimate", self.base_url, fund_code);
        self.execute(FundOperation::FetchEstimate, self.client.get(url))
            .await
    }

    pub async fn add_fund<T: Serialize + ?Sized>(&self, fund: &T) -> Result<Value> {
        let url = format!("{}/funds", self.base_url);
        self.execute(FundOperation::AddFund, self.client.post(url).json(fund))
            .await
    }

    /// Append one buy/sell transaction to a fund's history
    pub async fn add_fund_record<T: Serialize + ?Sized>(
        &self,
        fund_code: &str,
        record: &T,
    ) -> Result<Value> {
        let url = format!("{}/funds/{}/records", self.base_url, fund_code);
        self.execute(FundOperation::AddRecord, self.client.post(url).json(record))
            .await
    }

    async fn execute(&self, operation: FundOperation, request: RequestBuilder) -> Result<Value> {
        debug!(operation = ?operation, base_url = %self.base_url, "Calling fund backend");

        send(operation, request)
            .await
            .inspect_err(|e| error!(operation = ?operation, error = %e, "API call failed"))
    }
}

async fn send(operation: FundOperation, request: RequestBuilder) -> Result<Value> {
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(FundtrackError::FundApi {
            operation,
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}
