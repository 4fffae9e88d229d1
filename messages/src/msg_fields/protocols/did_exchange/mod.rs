//! Module containing the `did exchange` protocol messages, as defined in the [RFC](<https://github.com/hyperledger/aries-rfcs/blob/main/features/0023-did-exchange/README.md>).

pub mod complete;
pub mod problem_report;
pub mod request;
pub mod response;

use derive_more::From;
use serde::{Deserialize, Serialize};

use self::{
    complete::Complete, problem_report::ProblemReport, request::Request, response::Response,
};

#[derive(Clone, Debug, From, Deserialize, Serialize, PartialEq)]
#[serde(tag = "@type")]
pub enum DidExchange {
    #[serde(rename = "https://didcomm.org/didexchange/1.0/request")]
    Request(Request),
    #[serde(rename = "https://didcomm.org/didexchange/1.0/response")]
    Response(Response),
    #[serde(rename = "https://didcomm.org/didexchange/1.0/complete")]
    Complete(Complete),
    #[serde(rename = "https://didcomm.org/didexchange/1.0/problem_report")]
    ProblemReport(ProblemReport),
}
