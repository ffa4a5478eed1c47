//! reclaim-core
//!
//! 放置・税滞納クレームの自動回収エンジン。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（ids, claim, settings, decision, events, errors）
//! - **ports**: ホストへの抽象化レイヤー（ClaimRegistry, PolicyConfig, OptionResolver, Restorer など）
//! - **app**: アプリケーションロジック（builder, executor, sweep_loop, status）
//! - **impls**: 実装（InMemoryClaimRegistry など開発・テスト用）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
