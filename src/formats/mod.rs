// File format handlers
pub mod adms16;
pub mod chirp;

pub use adms16::{export_adms16, render_adms16, write_adms16, RenderError, CHANNEL_COUNT};
pub use chirp::{import_chirp_csv, parse_chirp_csv, ParseError};

use crate::core::validation::{validate_memory, ValidationMessage};
use anyhow::Context;
use std::io::{BufRead, Write};

/// Convert a CHIRP CSV export into an ADMS-16 import file.
///
/// Validation messages are logged and otherwise ignored. Nothing is written
/// to `output` unless the whole file renders. Returns the number of memories
/// read from the input.
pub fn convert<R: BufRead, W: Write>(input: R, output: W) -> anyhow::Result<usize> {
    let memories = parse_chirp_csv(input).context("Failed to parse CHIRP CSV")?;

    for mem in &memories {
        for msg in validate_memory(mem) {
            match msg {
                ValidationMessage::Warning(text) => tracing::warn!("{}", text),
                ValidationMessage::Error(text) => tracing::error!("{}", text),
            }
        }
    }

    write_adms16(&memories, output).context("Failed to render ADMS-16 file")?;
    tracing::info!(
        "Wrote {} channels from {} memories",
        CHANNEL_COUNT,
        memories.len()
    );

    Ok(memories.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const CHIRP_EXPORT: &str = "Location,Name,Frequency,Duplex,Offset,Tone,rToneFreq,cToneFreq,\
DtcsCode,DtcsPolarity,RxDtcsCode,CrossMode,Mode,TStep,Skip,Power,Comment,URCALL,RPT1CALL,RPT2CALL,DVCODE\r
1,REPEATER,146.940000,-,0.600000,Tone,88.5,88.5,023,NN,023,Tone->Tone,FM,5.00,,50W,,,,,\r
2,CALL,146.520000,,0.000000,,88.5,88.5,023,NN,023,Tone->Tone,FM,5.00,,50W,,,,,\r
5,220 RPT,224.940000,-,1.600000,DTCS,88.5,88.5,065,NN,023,Tone->Tone,NFM,5.00,,50W,,,,,\r
";

    #[test]
    fn test_convert() -> anyhow::Result<()> {
        let mut out = Vec::new();
        let count = convert(Cursor::new(CHIRP_EXPORT), &mut out)?;
        assert_eq!(count, 3);

        let text = String::from_utf8(out)?;
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), CHANNEL_COUNT as usize);
        assert_eq!(
            lines[0],
            "1,146.94000,146.34000,0.60000,-RPT,FM,FM,REPEATER,TONE,88.5 Hz,023,\
1500 Hz,RX 00,TX 00,HIGH,YES,25.0KHz,OFF,OFF,,0"
        );
        assert_eq!(
            lines[1],
            "2,146.52000,146.52000,0.60000,OFF,FM,FM,CALL,OFF,100.0 Hz,023,\
1500 Hz,RX 00,TX 00,HIGH,YES,25.0KHz,OFF,OFF,,0"
        );
        assert_eq!(lines[2], "3,,,,,,,,,,,,,,,,,,,,0");
        assert_eq!(
            lines[4],
            "5,224.94000,223.34000,1.60000,-RPT,FM,FM,220 RPT,DCS,100.0 Hz,065,\
1500 Hz,-,-,HIGH,YES,10.0KHz,ON,OFF,,0"
        );
        Ok(())
    }

    #[test]
    fn test_convert_rejects_absurd_frequencies() {
        let header = CHIRP_EXPORT.lines().next().unwrap();
        for row in [
            "1,X,9223372036854.000000,+,1000000.000000,,88.5,88.5,023,NN,023,Tone->Tone,FM",
            "1,X,1e20,,0.000000,,88.5,88.5,023,NN,023,Tone->Tone,FM",
        ] {
            let input = format!("{}\n{}\r\n", header, row);
            let mut out = Vec::new();

            let err = convert(Cursor::new(input), &mut out).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<ParseError>(),
                Some(ParseError::InvalidFrequency { line: 2, .. })
            ));
            assert!(out.is_empty());
        }
    }

    #[test]
    fn test_convert_bad_mode_writes_nothing() {
        let input = CHIRP_EXPORT.replace("NFM", "DV");
        let mut out = Vec::new();

        let err = convert(Cursor::new(input), &mut out).unwrap_err();
        let parse_err = err.downcast_ref::<ParseError>().unwrap();
        assert_eq!(parse_err.line(), Some(4));
        assert!(out.is_empty());
    }
}
