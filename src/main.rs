//! # Mini World Mod Generator - 命令行入口点
//!
//! 核心逻辑位于 `lib.rs`（`app_lib`），这里只负责启动。

fn main() {
    app_lib::run();
}
