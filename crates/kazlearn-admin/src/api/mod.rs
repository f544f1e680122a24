//! API 网关客户端
//!
//! - [`gateway`]：请求/响应的传输层与错误体解析
//! - [`client`]：按动词命名的类型化辅助方法
//! - 领域客户端：[`PublicApi`]、[`AdminApi`]、[`AdminWordsApi`]、[`MediaApi`]、[`GuidesApi`]

pub mod admin;
pub mod client;
pub mod gateway;
pub mod guides;
pub mod media;
pub mod public;
pub mod token;
pub mod words;

pub use admin::AdminApi;
pub use client::{ApiClient, encode_query};
pub use gateway::{ApiReply, ApiRequest, Gateway, HttpGateway, RequestBody, UploadForm};
pub use guides::GuidesApi;
pub use media::MediaApi;
pub use public::PublicApi;
pub use token::TokenStore;
pub use words::AdminWordsApi;

#[cfg(test)]
pub use gateway::MockGateway;
