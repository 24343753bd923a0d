//! Shell completion system for netgrade

use clap::{Command, CommandFactory};
use clap_complete::{Generator, generate};
use std::path::PathBuf;

/// Generate shell completions for the given shell
pub fn print_completions<G: Generator>(generator: G, app: &mut Command) {
    generate(
        generator,
        app,
        app.get_name().to_string(),
        &mut std::io::stdout(),
    );
}

/// Install shell completion to standard system location
pub fn install_completion(shell: clap_complete::Shell) -> Result<String, String> {
    use std::fs;

    let completion_dir = get_completion_directory(shell)?;
    let filename = get_completion_filename(shell);
    let completion_path = completion_dir.join(filename);

    let completion_script = generate_completion_script(shell)?;

    fs::write(&completion_path, completion_script).map_err(|e| {
        format!(
            "Failed to write completion file to {}: {}",
            completion_path.display(),
            e
        )
    })?;

    let instructions = get_shell_setup_instructions(shell, &completion_path);
    Ok(format!(
        "✅ Shell completion installed successfully!\n\n{instructions}"
    ))
}

/// Get the standard completion directory for a shell
fn get_completion_directory(shell: clap_complete::Shell) -> Result<PathBuf, String> {
    use std::fs;

    let home =
        std::env::var("HOME").map_err(|_| "HOME environment variable not set".to_string())?;

    match shell {
        clap_complete::Shell::Bash => first_usable_directory(
            vec![
                format!("{home}/.local/share/bash-completion/completions"),
                format!("{home}/.bash_completion.d"),
            ],
            format!("{home}/.local/share/bash-completion/completions"),
        ),
        clap_complete::Shell::Zsh => first_usable_directory(
            vec![
                format!("{home}/.local/share/zsh/site-functions"),
                format!("{home}/.zsh/completions"),
            ],
            format!("{home}/.local/share/zsh/site-functions"),
        ),
        clap_complete::Shell::Fish => {
            let path = PathBuf::from(format!("{home}/.config/fish/completions"));
            fs::create_dir_all(&path)
                .map_err(|e| format!("Failed to create fish completions directory: {e}"))?;
            Ok(path)
        }
        clap_complete::Shell::PowerShell => Err(
            "PowerShell completion installation not supported. Use 'netgrade completion-generate powershell' and add to your profile manually.".to_string(),
        ),
        clap_complete::Shell::Elvish => Err(
            "Elvish completion installation not supported. Use 'netgrade completion-generate elvish' and add to rc.elv manually.".to_string(),
        ),
        _ => Err(format!("Unsupported shell: {shell:?}")),
    }
}

/// Pick the first candidate whose parent exists, creating it if needed
fn first_usable_directory(candidates: Vec<String>, fallback: String) -> Result<PathBuf, String> {
    use std::fs;

    for dir in candidates {
        let path = PathBuf::from(&dir);
        if path.parent().is_some_and(|p| p.exists()) {
            if !path.exists() {
                fs::create_dir_all(&path)
                    .map_err(|e| format!("Failed to create directory {dir}: {e}"))?;
            }
            return Ok(path);
        }
    }

    let fallback = PathBuf::from(fallback);
    fs::create_dir_all(&fallback)
        .map_err(|e| format!("Failed to create completion directory: {e}"))?;
    Ok(fallback)
}

/// Get the standard filename for shell completions
fn get_completion_filename(shell: clap_complete::Shell) -> &'static str {
    match shell {
        clap_complete::Shell::Zsh => "_netgrade",
        clap_complete::Shell::Fish => "netgrade.fish",
        _ => "netgrade",
    }
}

/// Generate completion script for the given shell
fn generate_completion_script(shell: clap_complete::Shell) -> Result<String, String> {
    use std::io::Cursor;

    let mut cmd = crate::ui::cli::Cli::command();
    let mut buf = Cursor::new(Vec::new());
    generate(shell, &mut cmd, "netgrade", &mut buf);

    String::from_utf8(buf.into_inner())
        .map_err(|e| format!("Failed to generate completion script: {e}"))
}

/// Get shell-specific setup instructions
fn get_shell_setup_instructions(
    shell: clap_complete::Shell,
    completion_path: &std::path::Path,
) -> String {
    match shell {
        clap_complete::Shell::Bash => {
            format!(
                "Completion installed to: {}\n\n\
                To enable bash completions, add this to your ~/.bashrc or ~/.bash_profile:\n\
                if [[ -d ~/.local/share/bash-completion/completions ]]; then\n\
                    for completion in ~/.local/share/bash-completion/completions/*; do\n\
                        [[ -r \"$completion\" ]] && source \"$completion\"\n\
                    done\n\
                fi\n\n\
                Then restart your shell or run: source ~/.bashrc",
                completion_path.display()
            )
        }
        clap_complete::Shell::Zsh => {
            format!(
                "Completion installed to: {}\n\n\
                To enable zsh completions, add this to your ~/.zshrc:\n\
                if [[ -d ~/.local/share/zsh/site-functions ]]; then\n\
                    fpath=(~/.local/share/zsh/site-functions $fpath)\n\
                    autoload -U compinit && compinit\n\
                fi\n\n\
                Then restart your shell or run: source ~/.zshrc\n\
                You may also need to clear the completion cache: rm -f ~/.zcompdump*",
                completion_path.display()
            )
        }
        clap_complete::Shell::Fish => {
            format!(
                "Completion installed to: {}\n\n\
                Fish completions are automatically loaded from ~/.config/fish/completions/\n\
                Restart your shell or run: fish -c 'complete --erase; source ~/.config/fish/config.fish'",
                completion_path.display()
            )
        }
        _ => format!("Completion installed to: {}", completion_path.display()),
    }
}
