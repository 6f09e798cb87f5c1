use crate::{chip8::ChipSet, devices::DisplayCommands, opcode::Operation, ProcessError};

/// Will step the chip up to `ticks` times and forward all the display changes.
///
/// Returns the amount of steps that were run, the first error stops the run.
pub fn run<D>(chip: &mut ChipSet, display: &mut D, ticks: usize) -> Result<usize, ProcessError>
where
    D: DisplayCommands + ?Sized,
{
    for tick in 0..ticks {
        match chip.step() {
            Ok(Operation::Clear) => display.clear_display(),
            Ok(Operation::Draw) => display.display(chip.display()),
            Ok(Operation::None) => {}
            Err(err) => {
                log::error!("execution stopped after {} steps: {}", tick, err);
                return Err(err);
            }
        }
    }
    Ok(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{definitions::display, devices::MockDisplayCommands, DecodeError};

    #[test]
    fn test_run_forwards_display_changes() {
        // CLS, LD I 0x50, DRW V0 V0 5, JP 0x204
        let rom = [0x00, 0xE0, 0xA0, 0x50, 0xD0, 0x05, 0x12, 0x04];
        let mut chip = ChipSet::from_rom(&rom).expect("the rom fits");

        let mut mock = MockDisplayCommands::new();
        mock.expect_clear_display().times(1).return_const(());
        mock.expect_display()
            .withf(|pixels| pixels.len() == display::RESOLUTION && pixels[0])
            .times(1)
            .return_const(());

        assert_eq!(run(&mut chip, &mut mock, 4), Ok(4));
    }

    #[test]
    fn test_run_stops_at_error() {
        // LD V0 0x01, followed by an unsupported opcode
        let rom = [0x60, 0x01, 0xE0, 0x9E];
        let mut chip = ChipSet::from_rom(&rom).expect("the rom fits");

        let mut mock = MockDisplayCommands::new();
        mock.expect_clear_display().never();
        mock.expect_display().never();

        assert_eq!(
            run(&mut chip, &mut mock, 10),
            Err(ProcessError::Decode(DecodeError::InvalidOpcode(0xE09E)))
        );
        assert_eq!(chip.registers()[0], 0x01);
        assert_eq!(chip.program_counter(), 0x202);
    }
}
