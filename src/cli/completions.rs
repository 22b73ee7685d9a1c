use clap::Parser;

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    autoreg completions bash > ~/.bash_completion.d/autoreg\n\n\
                  Generate zsh completions:\n    autoreg completions zsh > ~/.zfunc/_autoreg\n\n\
                  Generate fish completions:\n    autoreg completions fish > ~/.config/fish/completions/autoreg.fish")]
pub struct CompletionsArgs {
    /// Shell type (bash, elvish, fish, powershell, zsh)
    pub shell: String,
}
