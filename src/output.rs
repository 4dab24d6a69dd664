use owo_colors::OwoColorize;

/// Coloured user-facing messages for the CLI. Colour only when the stream
/// being written is a TTY, so piped output stays plain.
fn stdout_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

fn stderr_tty() -> bool {
    atty::is(atty::Stream::Stderr)
}

pub fn print_info(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if stderr_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if stdout_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Yes/no answer for probe-style commands: `<label>: yes|no`.
pub fn print_verdict(label: &str, yes: bool) {
    let word = if yes { "yes" } else { "no" };
    if stdout_tty() {
        if yes {
            println!("{}: {}", label, word.green().bold());
        } else {
            println!("{}: {}", label, word.red().bold());
        }
    } else {
        println!("{}: {}", label, word);
    }
}

/// Plain line without prefix, for output scripts may parse.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}
