use crate::commands::{self, CommandResult};
use crate::presentation::input;
use anyhow::{Context, Result, bail};
use jwmgmt::api::HttpMethod;

/// グローバルフラグを取り除いた引数
pub struct CliArgs {
    /// --machine 指定時は JSON を stdout に出力する
    pub machine_output: bool,
    /// コマンド名以降の引数（プログラム名は含まない）
    pub args: Vec<String>,
}

/// グローバルフラグを抽出する
pub fn split_global_flags(args: &[String]) -> CliArgs {
    let machine_output = args.iter().skip(1).any(|a| a == "--machine");
    let args = args
        .iter()
        .skip(1)
        .filter(|a| *a != "--machine")
        .cloned()
        .collect();

    CliArgs {
        machine_output,
        args,
    }
}

/// CLI引数を解析し、適切なコマンドにディスパッチする
pub async fn dispatch(args: &[String]) -> Result<CommandResult> {
    let Some((command, rest)) = args.split_first() else {
        return commands::help::execute().await;
    };

    match command.as_str() {
        "login" => {
            let (use_stdin, rest) = take_flag(rest, "--stdin");
            expect_no_args("login", &rest)?;
            let credentials = if use_stdin {
                input::read_credentials_from_stdin()?
            } else {
                input::read_credentials_interactive()?
            };
            commands::login::execute(credentials)
                .await
                .context("Login command failed")
        }
        "logout" => {
            expect_no_args("logout", rest)?;
            commands::logout::execute()
                .await
                .context("Logout command failed")
        }
        "status" => {
            expect_no_args("status", rest)?;
            commands::status::execute()
                .await
                .context("Status command failed")
        }
        "list" => commands::list::execute(rest)
            .await
            .context("List command failed"),
        "show" => {
            let video_key = single_arg("show", "<video_key>", rest)?;
            commands::show::execute(video_key)
                .await
                .context("Show command failed")
        }
        "delete" => {
            let video_key = single_arg("delete", "<video_key>", rest)?;
            commands::delete::execute(video_key)
                .await
                .context("Delete command failed")
        }
        "create" => {
            let (tags, rest) = take_option(rest, "--tags")?;
            let (source_url, params) = rest
                .split_first()
                .context("Please specify a source URL for create command")?;
            commands::create::execute(source_url, tags.as_deref().unwrap_or(""), params)
                .await
                .context("Create command failed")
        }
        "update" => {
            let (tags, rest) = take_option(rest, "--tags")?;
            let (video_key, params) = rest
                .split_first()
                .context("Please specify a video key for update command")?;
            commands::update::execute(video_key, tags.as_deref().unwrap_or(""), params)
                .await
                .context("Update command failed")
        }
        "get" | "post" => {
            let method = if command == "get" {
                HttpMethod::Get
            } else {
                HttpMethod::Post
            };
            let (path, params) = rest
                .split_first()
                .with_context(|| format!("Please specify an API path for {} command", command))?;
            commands::call::execute(method, path, params)
                .await
                .with_context(|| format!("{} command failed", command))
        }
        "sign" => {
            let (path, params) = rest
                .split_first()
                .context("Please specify an API path for sign command")?;
            commands::sign::execute(path, params)
                .await
                .context("Sign command failed")
        }
        "help" | "--help" | "-h" => commands::help::execute().await,
        _ => bail!(
            "Unknown command: '{}'. Use 'help' to see available commands.",
            command
        ),
    }
}

/// 真偽フラグを取り除く
fn take_flag(args: &[String], flag: &str) -> (bool, Vec<String>) {
    let present = args.iter().any(|a| a == flag);
    let rest = args.iter().filter(|a| *a != flag).cloned().collect();
    (present, rest)
}

/// 値付きオプション（`--tags a,b`）を取り除く
fn take_option(args: &[String], option: &str) -> Result<(Option<String>, Vec<String>)> {
    let mut value = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if arg == option {
            let v = iter
                .next()
                .with_context(|| format!("{} requires a value", option))?;
            if value.replace(v.clone()).is_some() {
                bail!("{} was given more than once", option);
            }
        } else {
            rest.push(arg.clone());
        }
    }

    Ok((value, rest))
}

fn single_arg<'a>(command: &str, name: &str, args: &'a [String]) -> Result<&'a str> {
    match args {
        [value] => Ok(value.as_str()),
        [] => bail!("Please specify {} for {} command", name, command),
        _ => bail!("{} command takes exactly one argument: {}", command, name),
    }
}

fn expect_no_args(command: &str, args: &[String]) -> Result<()> {
    if let Some(extra) = args.first() {
        bail!("Unexpected argument for {} command: '{}'", command, extra);
    }
    Ok(())
}
