use eventseq_types::Direction;

pub const USAGE: &str = "usage: eventseq-sim [--ticks N] [--length N] [--reverse] [--realtime] [--json] [-v|--verbose]";

#[derive(Debug, Clone, PartialEq)]
pub struct SimArgs {
    pub ticks: u32,
    pub length: Option<u16>,
    pub direction: Option<Direction>,
    pub realtime: bool,
    pub json: bool,
    pub verbose: bool,
    pub help: bool,
}

impl Default for SimArgs {
    fn default() -> Self {
        Self {
            ticks: 32,
            length: None,
            direction: None,
            realtime: false,
            json: false,
            verbose: false,
            help: false,
        }
    }
}

impl SimArgs {
    pub fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut out = SimArgs::default();
        let mut it = args.into_iter();
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--ticks" => out.ticks = number(&arg, it.next())?,
                "--length" => out.length = Some(number(&arg, it.next())?),
                "--reverse" => out.direction = Some(Direction::Reverse),
                "--realtime" => out.realtime = true,
                "--json" => out.json = true,
                "-v" | "--verbose" => out.verbose = true,
                "-h" | "--help" => out.help = true,
                other => return Err(format!("unknown argument: {}", other)),
            }
        }
        Ok(out)
    }
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{}: not a number: {}", flag, value))
}
