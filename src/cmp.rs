// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Analog comparators
//!
//! Three comparators compare a positive input (`INP1`/`INP2`) against a negative reference
//! (`INM1`..`INM5`, the last three being DAC outputs). CMP1 and CMP2 can be paired into a window
//! comparator, see [`Window`]. Each unit can further mask its output with a blank window driven by
//! timer PWM outputs, and scan over several inputs on its own.
//!
//! ```ignore
//! let mut cmp = Comparator::new(dp.CMP3, &mut pwc.fcg3);
//! cmp.init(&Config::default().positive(PositiveInput::Inp1).negative(NegativeInput::Inm3));
//! cmp.enable();
//! if cmp.is_high().unwrap() {
//!     // ...
//! }
//! ```

use core::convert::Infallible;
use core::ops::{BitOr, Deref};

use embedded_hal::digital::v2::InputPin;

use crate::fcg::{Enable, Fcg3};
use crate::pac::{cmp, CMP1, CMP2, CMP3};
use crate::Error;

/// Fixed scan period overhead in comparator clocks
pub const SCAN_PERIOD_OVERHEAD: u16 = 5;

/// Comparator unit
pub trait Instance: Deref<Target = cmp::RegisterBlock> + Enable<Bus = Fcg3> {
    /// One based unit number
    const UNIT: u8;
}

impl Instance for CMP1 {
    const UNIT: u8 = 1;
}

impl Instance for CMP2 {
    const UNIT: u8 = 2;
}

impl Instance for CMP3 {
    const UNIT: u8 = 3;
}

/// Voltage under comparison
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PositiveInput {
    None,
    Inp1,
    Inp2,
}

impl PositiveInput {
    const fn bits(self) -> u16 {
        let sel = match self {
            PositiveInput::None => 0,
            PositiveInput::Inp1 => 0b01,
            PositiveInput::Inp2 => 0b10,
        };
        sel << cmp::pmsr::CVSL_POS
    }
}

/// Reference voltage
///
/// `Inm3`..`Inm5` are the DAC1 channel 1, DAC1 channel 2 and DAC2 channel 1 outputs.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NegativeInput {
    None,
    Inm1,
    Inm2,
    Inm3,
    Inm4,
    Inm5,
}

impl NegativeInput {
    const fn bits(self) -> u16 {
        match self {
            NegativeInput::None => 0,
            NegativeInput::Inm1 => 1 << 0,
            NegativeInput::Inm2 => 1 << 1,
            NegativeInput::Inm3 => 1 << 2,
            NegativeInput::Inm4 => 1 << 3,
            NegativeInput::Inm5 => 1 << 4,
        }
    }

    fn from_bits(bits: u16) -> Self {
        match bits {
            0b0_0001 => NegativeInput::Inm1,
            0b0_0010 => NegativeInput::Inm2,
            0b0_0100 => NegativeInput::Inm3,
            0b0_1000 => NegativeInput::Inm4,
            0b1_0000 => NegativeInput::Inm5,
            _ => NegativeInput::None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    Normal,
    Inverted,
}

/// Output edges that set the detect flags and raise the interrupt
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DetectEdges {
    None,
    Rising,
    Falling,
    Both,
}

/// Output digital filter clock
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Filter {
    None,
    Pclk,
    PclkDiv2,
    PclkDiv4,
    PclkDiv8,
    PclkDiv16,
    PclkDiv32,
}

impl Filter {
    const fn bits(self) -> u16 {
        self as u16
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hysteresis {
    None,
    Mv10,
    Mv20,
    Mv30,
    Mv40,
    Mv50,
    Mv60,
    Mv70,
}

/// Edge detect flag
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Rising,
    Falling,
}

impl Edge {
    const fn flag(self) -> u16 {
        match self {
            Edge::Rising => cmp::fir::CRF,
            Edge::Falling => cmp::fir::CFF,
        }
    }
}

/// Normal mode configuration
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub positive: PositiveInput,
    pub negative: NegativeInput,
    pub polarity: Polarity,
    pub edges: DetectEdges,
    pub filter: Filter,
    pub hysteresis: Hysteresis,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            positive: PositiveInput::None,
            negative: NegativeInput::None,
            polarity: Polarity::Normal,
            edges: DetectEdges::None,
            filter: Filter::None,
            hysteresis: Hysteresis::None,
        }
    }
}

impl Config {
    pub fn positive(mut self, positive: PositiveInput) -> Self {
        self.positive = positive;
        self
    }

    pub fn negative(mut self, negative: NegativeInput) -> Self {
        self.negative = negative;
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn edges(mut self, edges: DetectEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn hysteresis(mut self, hysteresis: Hysteresis) -> Self {
        self.hysteresis = hysteresis;
        self
    }
}

/// Timer outputs that can open the blank window, any combination of `SRC1`..`SRC16`
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlankSource(u16);

impl BlankSource {
    pub const SRC1: Self = Self(1 << 0);
    pub const SRC2: Self = Self(1 << 1);
    pub const SRC3: Self = Self(1 << 2);
    pub const SRC4: Self = Self(1 << 3);
    pub const SRC5: Self = Self(1 << 4);
    pub const SRC6: Self = Self(1 << 5);
    pub const SRC7: Self = Self(1 << 6);
    pub const SRC8: Self = Self(1 << 7);
    pub const SRC9: Self = Self(1 << 8);
    pub const SRC10: Self = Self(1 << 9);
    pub const SRC11: Self = Self(1 << 10);
    pub const SRC12: Self = Self(1 << 11);
    pub const SRC13: Self = Self(1 << 12);
    pub const SRC14: Self = Self(1 << 13);
    pub const SRC15: Self = Self(1 << 14);
    pub const SRC16: Self = Self(1 << 15);

    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for BlankSource {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Source level that keeps the blank window open
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidLevel {
    Low,
    High,
}

/// Source edge that opens the blank window
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidEdge {
    None,
    Rising,
    Falling,
    All,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlankMode {
    Level,
    Edge,
}

/// When the blank window is open
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlankCondition {
    /// While a source sits at the given level
    Level(ValidLevel),
    /// For `mask_width` comparator clocks after a source edge
    Edge { edge: ValidEdge, mask_width: u8 },
}

/// Comparator output while the blank window is open
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlankOutput {
    Low,
    High,
    Hold,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BlankWindowConfig {
    pub condition: BlankCondition,
    pub sources: BlankSource,
    pub output: BlankOutput,
}

impl Default for BlankWindowConfig {
    fn default() -> Self {
        Self {
            condition: BlankCondition::Level(ValidLevel::Low),
            sources: BlankSource(0),
            output: BlankOutput::Low,
        }
    }
}

impl BlankWindowConfig {
    pub fn condition(mut self, condition: BlankCondition) -> Self {
        self.condition = condition;
        self
    }

    pub fn sources(mut self, sources: BlankSource) -> Self {
        self.sources = sources;
        self
    }

    pub fn output(mut self, output: BlankOutput) -> Self {
        self.output = output;
        self
    }
}

/// Which input the scan walks over
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ScanMode {
    None,
    /// Positive inputs against a fixed reference
    Inp,
    /// Negative inputs against a fixed positive input
    Inm,
}

impl ScanMode {
    const fn bits(self) -> u16 {
        let sel = match self {
            ScanMode::None => 0b00,
            ScanMode::Inp => 0b10,
            ScanMode::Inm => 0b11,
        };
        sel << cmp::mdr::CSMD_POS
    }
}

/// Inputs taking part in a scan
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanSource(u16);

impl ScanSource {
    pub const INP1_INM1: Self = Self(0x01);
    pub const INP2_INM2: Self = Self(0x02);
    pub const INM3: Self = Self(0x04);
    pub const INM4: Self = Self(0x08);
    pub const INM5: Self = Self(0x10);
    pub const INP_ALL: Self = Self(0x03);
    pub const INM_ALL: Self = Self(0x1F);

    pub const fn bits(self) -> u16 {
        self.0
    }
}

impl BitOr for ScanSource {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    pub mode: ScanMode,
    pub sources: ScanSource,
    /// Settling time per input in comparator clocks, `0..=0x3F`
    pub stable: u8,
    /// Time per input in comparator clocks, `0x08..=0xFF`
    pub period: u8,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: ScanMode::None,
            sources: ScanSource(0),
            stable: 0,
            period: 0x0F,
        }
    }
}

impl ScanConfig {
    pub fn mode(mut self, mode: ScanMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn sources(mut self, sources: ScanSource) -> Self {
        self.sources = sources;
        self
    }

    pub fn time(mut self, stable: u8, period: u8) -> Self {
        self.stable = stable;
        self.period = period;
        self
    }
}

/// Comparator driver
pub struct Comparator<CMP> {
    cmp: CMP,
}

impl<CMP: Instance> Comparator<CMP> {
    /// Enables the unit clock and takes ownership of it.
    pub fn new(cmp: CMP, fcg3: &mut Fcg3) -> Self {
        CMP::enable(fcg3);
        Comparator { cmp }
    }

    fn apply(&mut self, positive: PositiveInput, negative: NegativeInput, config: &Config) {
        self.disable();
        self.cmp
            .pmsr
            .write(positive.bits() | negative.bits());
        self.set_hysteresis(config.hysteresis);
        self.set_filter(config.filter);
        self.set_detect_edges(config.edges);
        self.set_polarity(config.polarity);
    }

    /// Programs the unit for normal mode and leaves it disabled.
    pub fn init(&mut self, config: &Config) {
        trace!("cmp{=u8} init", CMP::UNIT);
        self.apply(config.positive, config.negative, config);
    }

    /// Writes the reset value to every register.
    pub fn deinit(&mut self) {
        let regs = &*self.cmp;
        regs.mdr.write(cmp::mdr::RESET);
        regs.fir.write(cmp::fir::RESET);
        regs.ocr.write(cmp::ocr::RESET);
        regs.pmsr.write(cmp::pmsr::RESET);
        regs.bwsr1.write(0);
        regs.bwsr2.write(0);
        regs.bwpr.write(0);
        regs.sccr.write(0);
        regs.sctr.write(0);
    }

    pub fn enable(&mut self) {
        self.cmp.mdr.set_bits(cmp::mdr::CENB);
    }

    pub fn disable(&mut self) {
        self.cmp.mdr.clear_bits(cmp::mdr::CENB);
    }

    /// Starts raising the interrupt on the detect edges.
    pub fn listen(&mut self) {
        self.cmp.fir.set_bits(cmp::fir::CIEN);
    }

    pub fn unlisten(&mut self) {
        self.cmp.fir.clear_bits(cmp::fir::CIEN);
    }

    /// Routes the result to the internal output signal.
    pub fn set_compare_output(&mut self, enable: bool) {
        if enable {
            self.cmp.ocr.set_bits(cmp::ocr::COEN);
        } else {
            self.cmp.ocr.clear_bits(cmp::ocr::COEN);
        }
    }

    /// Drives the result onto the `VCOUT` pin.
    pub fn set_pin_output(&mut self, enable: bool) {
        if enable {
            self.cmp.ocr.set_bits(cmp::ocr::CPOE);
        } else {
            self.cmp.ocr.clear_bits(cmp::ocr::CPOE);
        }
    }

    /// Current comparison result.
    pub fn output(&self) -> bool {
        self.cmp.mdr.is_set(cmp::mdr::CMON)
    }

    pub fn set_detect_edges(&mut self, edges: DetectEdges) {
        self.cmp
            .fir
            .modify_bits(cmp::fir::EDGS, (edges as u16) << cmp::fir::EDGS_POS);
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.cmp.fir.modify_bits(cmp::fir::FCKS, filter.bits());
    }

    pub fn set_polarity(&mut self, polarity: Polarity) {
        let bits = match polarity {
            Polarity::Normal => 0,
            Polarity::Inverted => cmp::ocr::COPS,
        };
        self.cmp.ocr.modify_bits(cmp::ocr::COPS, bits);
    }

    pub fn set_positive_input(&mut self, input: PositiveInput) {
        self.cmp.pmsr.modify_bits(cmp::pmsr::CVSL, input.bits());
    }

    pub fn set_negative_input(&mut self, input: NegativeInput) {
        self.cmp.pmsr.modify_bits(cmp::pmsr::RVSL, input.bits());
    }

    pub fn set_hysteresis(&mut self, hysteresis: Hysteresis) {
        self.cmp
            .mdr
            .modify_bits(cmp::mdr::HYST, (hysteresis as u16) << cmp::mdr::HYST_POS);
    }

    /// Returns `true` if `edge` was detected since the flag was last cleared.
    pub fn is_pending(&self, edge: Edge) -> bool {
        self.cmp.fir.is_set(edge.flag())
    }

    pub fn clear_pending(&mut self, edge: Edge) {
        self.cmp.fir.clear_bits(edge.flag());
    }

    /// Programs the blank window. The window itself is switched by [`set_blank_window`].
    ///
    /// [`set_blank_window`]: Comparator::set_blank_window
    pub fn configure_blank_window(&mut self, config: &BlankWindowConfig) -> Result<(), Error> {
        if config.sources.bits() == 0 {
            return Err(Error::InvalidParameter);
        }
        let regs = &*self.cmp;
        regs.bwsr1.write(config.sources.bits());
        match config.condition {
            BlankCondition::Level(level) => {
                let bits = match level {
                    ValidLevel::Low => 0,
                    ValidLevel::High => cmp::bwsr2::TWLV,
                };
                regs.bwsr2.modify_bits(cmp::bwsr2::TWLV, bits);
            }
            BlankCondition::Edge { edge, mask_width } => {
                regs.bwsr2.modify_bits(cmp::bwsr2::TWEG, edge as u16);
                regs.bwpr.write(u16::from(mask_width));
            }
        }
        let mode = match config.condition {
            BlankCondition::Level(_) => BlankMode::Level,
            BlankCondition::Edge { .. } => BlankMode::Edge,
        };
        self.set_blank_window_mode(mode);
        let output = match config.output {
            BlankOutput::Low => 0b00,
            BlankOutput::High => 0b01,
            BlankOutput::Hold => 0b10,
        };
        self.cmp
            .ocr
            .modify_bits(cmp::ocr::BWOL, output << cmp::ocr::BWOL_POS);
        Ok(())
    }

    /// Removes `sources` from the blank window triggers.
    pub fn disable_blank_window_source(&mut self, sources: BlankSource) {
        self.cmp.bwsr1.clear_bits(sources.bits());
    }

    pub fn set_blank_window(&mut self, enable: bool) {
        if enable {
            self.cmp.ocr.set_bits(cmp::ocr::BWEN);
        } else {
            self.cmp.ocr.clear_bits(cmp::ocr::BWEN);
        }
    }

    pub fn set_blank_window_mode(&mut self, mode: BlankMode) {
        let bits = match mode {
            BlankMode::Level => 0,
            BlankMode::Edge => cmp::ocr::BWMD,
        };
        self.cmp.ocr.modify_bits(cmp::ocr::BWMD, bits);
    }

    /// Programs the scan timing.
    ///
    /// The period must cover the settling time, four clocks per filter step and a fixed overhead
    /// of [`SCAN_PERIOD_OVERHEAD`] clocks.
    pub fn set_scan_time(&mut self, stable: u8, period: u8) -> Result<(), Error> {
        let filter = self.cmp.fir.read_bits(cmp::fir::FCKS);
        let stable = u16::from(stable);
        let period = u16::from(period);
        if stable > cmp::sctr::STB
            || period < 0x08
            || period <= stable + filter * 4 + SCAN_PERIOD_OVERHEAD
        {
            return Err(Error::InvalidParameter);
        }
        self.cmp
            .sctr
            .write(stable | (period << cmp::sctr::PRD_POS));
        Ok(())
    }

    pub fn set_scan_mode(&mut self, mode: ScanMode) {
        self.cmp.mdr.modify_bits(cmp::mdr::CSMD, mode.bits());
    }

    pub fn set_scan_sources(&mut self, sources: ScanSource) {
        self.cmp.sccr.modify_bits(cmp::sccr::SCSL, sources.bits());
    }

    /// Programs mode, sources and timing of the scan.
    pub fn configure_scan(&mut self, config: &ScanConfig) -> Result<(), Error> {
        self.set_scan_time(config.stable, config.period)?;
        self.set_scan_mode(config.mode);
        self.set_scan_sources(config.sources);
        Ok(())
    }

    pub fn set_scan(&mut self, enable: bool) {
        if enable {
            self.cmp.sccr.set_bits(cmp::sccr::SCEN);
        } else {
            self.cmp.sccr.clear_bits(cmp::sccr::SCEN);
        }
    }

    /// Positive input the scan is currently at.
    pub fn scan_inp_source(&self) -> PositiveInput {
        match self.cmp.scmr.read_bits(cmp::scmr::CVST) {
            0b01 => PositiveInput::Inp1,
            0b10 => PositiveInput::Inp2,
            _ => PositiveInput::None,
        }
    }

    /// Negative input the scan is currently at.
    pub fn scan_inm_source(&self) -> NegativeInput {
        NegativeInput::from_bits(self.cmp.scmr.read_bits(cmp::scmr::RVST) >> cmp::scmr::RVST_POS)
    }

    /// Releases the comparator peripheral
    pub fn free(self) -> CMP {
        self.cmp
    }
}

impl<CMP: Instance> InputPin for Comparator<CMP> {
    type Error = Infallible;

    fn is_high(&self) -> Result<bool, Self::Error> {
        Ok(self.output())
    }

    fn is_low(&self) -> Result<bool, Self::Error> {
        Ok(!self.output())
    }
}

/// Window mode configuration
///
/// The compared voltage is `INP2`, shared by CMP1 and CMP2.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WindowConfig {
    /// Lower threshold, negative input of CMP1
    pub low: NegativeInput,
    /// Upper threshold, negative input of CMP2
    pub high: NegativeInput,
    pub polarity: Polarity,
    pub edges: DetectEdges,
    pub filter: Filter,
    pub hysteresis: Hysteresis,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            low: NegativeInput::None,
            high: NegativeInput::None,
            polarity: Polarity::Normal,
            edges: DetectEdges::None,
            filter: Filter::None,
            hysteresis: Hysteresis::None,
        }
    }
}

impl WindowConfig {
    pub fn thresholds(mut self, low: NegativeInput, high: NegativeInput) -> Self {
        self.low = low;
        self.high = high;
        self
    }

    pub fn polarity(mut self, polarity: Polarity) -> Self {
        self.polarity = polarity;
        self
    }

    pub fn edges(mut self, edges: DetectEdges) -> Self {
        self.edges = edges;
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn hysteresis(mut self, hysteresis: Hysteresis) -> Self {
        self.hysteresis = hysteresis;
        self
    }
}

/// CMP1 and CMP2 working as one window comparator
///
/// The window result is reported by CMP2.
pub struct Window {
    cmp1: Comparator<CMP1>,
    cmp2: Comparator<CMP2>,
}

impl Window {
    pub fn new(cmp1: Comparator<CMP1>, cmp2: Comparator<CMP2>) -> Self {
        Window { cmp1, cmp2 }
    }

    /// Programs both units for window mode and leaves them disabled.
    pub fn init(&mut self, config: &WindowConfig) {
        trace!("cmp window init");
        let normal = Config {
            positive: PositiveInput::Inp2,
            negative: NegativeInput::None,
            polarity: config.polarity,
            edges: config.edges,
            filter: config.filter,
            hysteresis: config.hysteresis,
        };
        self.cmp1.apply(PositiveInput::Inp2, config.low, &normal);
        self.cmp2.apply(PositiveInput::Inp2, config.high, &normal);
        self.cmp2.cmp.mdr.set_bits(cmp::mdr::CWDE);
    }

    pub fn enable(&mut self) {
        self.cmp1.enable();
        self.cmp2.enable();
    }

    pub fn disable(&mut self) {
        self.cmp2.disable();
        self.cmp1.disable();
    }

    /// Returns `true` while the input is inside the window.
    pub fn output(&self) -> bool {
        self.cmp2.output()
    }

    /// The unit carrying the window output, for edge flags, blank window and output control.
    pub fn output_unit(&mut self) -> &mut Comparator<CMP2> {
        &mut self.cmp2
    }

    /// Leaves window mode and hands back both comparators.
    pub fn free(mut self) -> (Comparator<CMP1>, Comparator<CMP2>) {
        self.cmp2.cmp.mdr.clear_bits(cmp::mdr::CWDE);
        (self.cmp1, self.cmp2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparator<CMP: Instance>(raw: CMP) -> (Comparator<CMP>, &'static cmp::RegisterBlock) {
        let mut pwc = crate::pwc::mock();
        let rb = unsafe { &*(&*raw as *const cmp::RegisterBlock) };
        (Comparator::new(raw, &mut pwc.fcg3), rb)
    }

    #[test]
    fn init_programs_inputs_and_leaves_unit_disabled() {
        let (mut cmp, rb) = comparator(CMP3::mock());
        rb.mdr.write(cmp::mdr::CENB);

        cmp.init(
            &Config::default()
                .positive(PositiveInput::Inp1)
                .negative(NegativeInput::Inm4)
                .polarity(Polarity::Inverted)
                .edges(DetectEdges::Falling)
                .filter(Filter::PclkDiv8)
                .hysteresis(Hysteresis::Mv30),
        );
        assert_eq!(rb.mdr.read(), 3 << 8);
        assert_eq!(rb.pmsr.read(), (1 << 8) | (1 << 3));
        assert_eq!(rb.fir.read(), (2 << 4) | 4);
        assert_eq!(rb.ocr.read(), cmp::ocr::COPS);

        cmp.enable();
        assert!(rb.mdr.is_set(cmp::mdr::CENB));
    }

    #[test]
    fn output_reads_cmon() {
        let (cmp, rb) = comparator(CMP1::mock());
        assert_eq!(cmp.is_high(), Ok(false));
        rb.mdr.write(cmp::mdr::CMON);
        assert_eq!(cmp.is_high(), Ok(true));
        assert_eq!(cmp.is_low(), Ok(false));
    }

    #[test]
    fn edge_flags() {
        let (mut cmp, rb) = comparator(CMP2::mock());
        rb.fir.write(cmp::fir::CRF | cmp::fir::CFF | cmp::fir::CIEN);
        assert!(cmp.is_pending(Edge::Rising));
        cmp.clear_pending(Edge::Rising);
        assert!(!cmp.is_pending(Edge::Rising));
        assert!(cmp.is_pending(Edge::Falling));
        cmp.unlisten();
        assert_eq!(rb.fir.read(), cmp::fir::CFF);
    }

    #[test]
    fn window_init_pairs_cmp1_and_cmp2() {
        let (cmp1, rb1) = comparator(CMP1::mock());
        let (cmp2, rb2) = comparator(CMP2::mock());
        let mut window = Window::new(cmp1, cmp2);

        window.init(&WindowConfig::default().thresholds(NegativeInput::Inm3, NegativeInput::Inm5));
        assert_eq!(rb1.pmsr.read(), (2 << 8) | (1 << 2));
        assert_eq!(rb2.pmsr.read(), (2 << 8) | (1 << 4));
        assert_eq!(rb1.mdr.read(), 0);
        assert_eq!(rb2.mdr.read(), cmp::mdr::CWDE);

        window.enable();
        rb2.mdr.set_bits(cmp::mdr::CMON);
        assert!(window.output());

        let (_, _) = window.free();
        assert_eq!(rb2.mdr.read(), cmp::mdr::CENB | cmp::mdr::CMON);
    }

    #[test]
    fn blank_window_level_and_edge() {
        let (mut cmp, rb) = comparator(CMP1::mock());
        assert_eq!(
            cmp.configure_blank_window(&BlankWindowConfig::default()),
            Err(Error::InvalidParameter)
        );

        cmp.configure_blank_window(
            &BlankWindowConfig::default()
                .sources(BlankSource::SRC7 | BlankSource::SRC16)
                .condition(BlankCondition::Level(ValidLevel::High))
                .output(BlankOutput::Hold),
        )
        .unwrap();
        assert_eq!(rb.bwsr1.read(), 0x8040);
        assert_eq!(rb.bwsr2.read(), cmp::bwsr2::TWLV);
        assert_eq!(rb.ocr.read(), 2 << 5);

        cmp.configure_blank_window(
            &BlankWindowConfig::default()
                .sources(BlankSource::SRC1)
                .condition(BlankCondition::Edge {
                    edge: ValidEdge::Falling,
                    mask_width: 200,
                }),
        )
        .unwrap();
        assert_eq!(rb.bwsr2.read(), cmp::bwsr2::TWLV | 0b10);
        assert_eq!(rb.bwpr.read(), 200);
        assert_eq!(rb.ocr.read(), cmp::ocr::BWMD);

        cmp.set_blank_window(true);
        assert!(rb.ocr.is_set(cmp::ocr::BWEN));
        cmp.disable_blank_window_source(BlankSource::SRC1);
        assert_eq!(rb.bwsr1.read(), 0);
    }

    #[test]
    fn scan_time_limits() {
        let (mut cmp, rb) = comparator(CMP3::mock());
        assert_eq!(cmp.set_scan_time(0x40, 0xFF), Err(Error::InvalidParameter));
        assert_eq!(cmp.set_scan_time(0, 0x07), Err(Error::InvalidParameter));
        // 3 + 0 * 4 + 5 = 8, the period has to exceed it
        assert_eq!(cmp.set_scan_time(3, 0x08), Err(Error::InvalidParameter));
        cmp.set_scan_time(3, 0x09).unwrap();
        assert_eq!(rb.sctr.read(), 0x0903);

        cmp.set_filter(Filter::PclkDiv2);
        // 3 + 2 * 4 + 5 = 16
        assert_eq!(cmp.set_scan_time(3, 0x10), Err(Error::InvalidParameter));
        assert!(cmp.set_scan_time(3, 0x11).is_ok());
    }

    #[test]
    fn scan_configuration_and_position() {
        let (mut cmp, rb) = comparator(CMP2::mock());
        cmp.configure_scan(
            &ScanConfig::default()
                .mode(ScanMode::Inm)
                .sources(ScanSource::INM3 | ScanSource::INM5)
                .time(4, 0x20),
        )
        .unwrap();
        assert_eq!(rb.mdr.read(), 0b11 << 4);
        assert_eq!(rb.sccr.read(), 0x14);
        cmp.set_scan(true);
        assert_eq!(rb.sccr.read(), 0x8014);

        rb.scmr.write((0x10 << 8) | 0b10);
        assert_eq!(cmp.scan_inm_source(), NegativeInput::Inm5);
        assert_eq!(cmp.scan_inp_source(), PositiveInput::Inp2);
    }

    #[test]
    fn deinit_clears_configuration() {
        let (mut cmp, rb) = comparator(CMP1::mock());
        rb.mdr.write(0x0731);
        rb.ocr.write(0x007F);
        rb.sctr.write(0x0903);
        cmp.deinit();
        assert_eq!(rb.mdr.read(), 0);
        assert_eq!(rb.ocr.read(), 0);
        assert_eq!(rb.sctr.read(), 0);
    }
}
