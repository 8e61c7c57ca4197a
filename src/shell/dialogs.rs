//! # 终端确认框和标准输入
//!
//! 标准输入由一个独立线程逐行读取并送入通道，交互循环和确认框共用同一个接收端。
//! 确认框会阻塞当前线程直到用户回答，与浏览器 `confirm()` 阻塞页面的行为相同。

use std::io::{BufRead, Write};
use std::rc::Rc;
use std::sync::mpsc::{self, Receiver};

use crate::commands::controller::Dialogs;

/// 启动标准输入读取线程
///
/// 输入结束（EOF）或读取出错时线程退出，接收端随后返回 `Disconnected`。
pub fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    log::error!("读取标准输入失败: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

/// 判断一行回答是否表示确认
pub fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "c" | "có" | "co" | "ok"
    )
}

/// 在终端中询问 y/N 的确认框
pub struct TerminalDialogs {
    assume_yes: bool,
    input: Rc<Receiver<String>>,
}

impl TerminalDialogs {
    pub fn new(assume_yes: bool, input: Rc<Receiver<String>>) -> Self {
        Self { assume_yes, input }
    }
}

impl Dialogs for TerminalDialogs {
    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            log::debug!("自动确认: {}", message);
            return true;
        }

        print!("{} [y/N] ", message);
        let _ = std::io::stdout().flush();

        // 输入已关闭时按取消处理
        match self.input.recv() {
            Ok(answer) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}
