// Copyright 2023 The hc32-hal authors.
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Direct memory access
//!
//! Every DMA unit has eight channels. [`DmaExt::split`] clocks the unit, switches it on and hands
//! out the channels. A channel owns its register window plus its own bits in the status, mask and
//! enable registers the channels share.
//!
//! ```ignore
//! let mut channels = dp.DMA1.split(&mut pwc.fcg0);
//! let ch = &mut channels.0;
//! ch.init(
//!     &Config::default()
//!         .source(src.as_ptr() as u32)
//!         .destination(dst.as_mut_ptr() as u32)
//!         .width(DataWidth::Bits32)
//!         .count(16)
//!         .source_mode(AddressMode::Increment)
//!         .destination_mode(AddressMode::Increment),
//! )?;
//! ch.start();
//! ch.software_trigger();
//! while !ch.is_pending(Event::TransferComplete) {}
//! ```

use core::marker::PhantomData;
use core::ops::Deref;

#[cfg(feature = "hc32f334")]
use crate::aos::{Aos, EventSource, Target};
use crate::fcg::{Enable, Fcg0};
use crate::pac::{dma, Reg, DMA1};
use crate::Error;

/// Largest block size, written to the register as 0
pub const MAX_BLOCK_SIZE: u16 = 1024;
pub const MAX_REPEAT_SIZE: u16 = 1024;
pub const MAX_NON_SEQUENCE_COUNT: u16 = 4096;
pub const MAX_NON_SEQUENCE_OFFSET: u32 = dma::nseqctl::OFFSET;

pub trait Instance: Deref<Target = dma::RegisterBlock> + Enable<Bus = Fcg0> {}

impl Instance for DMA1 {}
#[cfg(feature = "hc32f4a0")]
impl Instance for crate::pac::DMA2 {}

/// Extension trait to split a DMA unit into its channels
pub trait DmaExt {
    type Channels;

    fn split(self, fcg0: &mut Fcg0) -> Self::Channels;
}

impl<DMA: Instance> DmaExt for DMA {
    type Channels = Channels<DMA>;

    fn split(self, fcg0: &mut Fcg0) -> Channels<DMA> {
        DMA::enable(fcg0);
        self.en.write(dma::en::EN);

        let rb: *const dma::RegisterBlock = &*self;
        Channels(
            Channel::new(rb, 0),
            Channel::new(rb, 1),
            Channel::new(rb, 2),
            Channel::new(rb, 3),
            Channel::new(rb, 4),
            Channel::new(rb, 5),
            Channel::new(rb, 6),
            Channel::new(rb, 7),
        )
    }
}

/// The eight channels of a DMA unit
pub struct Channels<DMA>(
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
    pub Channel<DMA>,
);

/// Width of a single data transfer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    Bits8 = 0,
    Bits16 = 1,
    Bits32 = 2,
}

impl DataWidth {
    fn is_aligned(self, address: u32) -> bool {
        address & ((1 << self as u32) - 1) == 0
    }
}

/// How an address moves after each data transfer
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressMode {
    Fixed = 0,
    Increment = 1,
    Decrement = 2,
}

/// Which side of the transfer a repeat or non-sequence setting applies to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sides {
    None,
    Source,
    Destination,
    Both,
}

impl Sides {
    fn bits(self, source: u32, destination: u32) -> u32 {
        match self {
            Sides::None => 0,
            Sides::Source => source,
            Sides::Destination => destination,
            Sides::Both => source | destination,
        }
    }
}

/// Basic transfer setup
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub source: u32,
    pub destination: u32,
    pub width: DataWidth,
    /// Data transfers per request, `0..=1024` where 0 also means 1024
    pub block_size: u16,
    /// Blocks to transfer, 0 runs until the channel is stopped
    pub count: u16,
    pub source_mode: AddressMode,
    pub destination_mode: AddressMode,
    /// Channel interrupt output, see [`Channel::listen`] for the individual events
    pub interrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: 0,
            destination: 0,
            width: DataWidth::Bits8,
            block_size: 1,
            count: 0,
            source_mode: AddressMode::Fixed,
            destination_mode: AddressMode::Fixed,
            interrupt: false,
        }
    }
}

impl Config {
    pub fn source(mut self, address: u32) -> Self {
        self.source = address;
        self
    }

    pub fn destination(mut self, address: u32) -> Self {
        self.destination = address;
        self
    }

    pub fn width(mut self, width: DataWidth) -> Self {
        self.width = width;
        self
    }

    pub fn block_size(mut self, block_size: u16) -> Self {
        self.block_size = block_size;
        self
    }

    pub fn count(mut self, count: u16) -> Self {
        self.count = count;
        self
    }

    pub fn source_mode(mut self, mode: AddressMode) -> Self {
        self.source_mode = mode;
        self
    }

    pub fn destination_mode(mut self, mode: AddressMode) -> Self {
        self.destination_mode = mode;
        self
    }

    pub fn interrupt(mut self, enable: bool) -> Self {
        self.interrupt = enable;
        self
    }
}

/// Repeat mode: the address reloads after `size` data transfers
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RepeatConfig {
    pub sides: Sides,
    pub source_size: u16,
    pub destination_size: u16,
}

/// Non-sequence mode: the address jumps by `offset` data after `count` transfers
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NonSequenceConfig {
    pub sides: Sides,
    pub source_count: u16,
    pub source_offset: u32,
    pub destination_count: u16,
    pub destination_offset: u32,
}

impl Default for Sides {
    fn default() -> Self {
        Sides::None
    }
}

/// Linked list mode: the channel reloads its registers from a descriptor in memory
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkedListConfig {
    pub enable: bool,
    /// Start the next descriptor right away instead of waiting for a request
    pub run: bool,
    /// Word aligned descriptor address
    pub address: u32,
}

/// Channel events
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    TransferComplete,
    BlockComplete,
    TransferError,
    RequestError,
}

/// One DMA channel
pub struct Channel<DMA> {
    rb: *const dma::RegisterBlock,
    index: u8,
    _dma: PhantomData<DMA>,
}

unsafe impl<DMA> Send for Channel<DMA> {}

impl<DMA> Channel<DMA> {
    fn new(rb: *const dma::RegisterBlock, index: u8) -> Self {
        Self {
            rb,
            index,
            _dma: PhantomData,
        }
    }

    fn regs(&self) -> &dma::RegisterBlock {
        // NOTE(unsafe) the block outlives the channel and the channel only writes its own bits
        unsafe { &*self.rb }
    }

    fn ch(&self) -> &dma::Channel {
        &self.regs().ch[usize::from(self.index)]
    }

    fn bit(&self) -> u32 {
        1 << self.index
    }

    /// Status, mask and clear register of `event` plus the channel's bit in them.
    fn event_regs(&self, event: Event) -> (&Reg<u32>, &Reg<u32>, &Reg<u32>, u32) {
        let regs = self.regs();
        let bit = self.bit();
        match event {
            Event::TransferComplete => (
                &regs.intstat1,
                &regs.intmask1,
                &regs.intclr1,
                bit << dma::int1::TC_POS,
            ),
            Event::BlockComplete => (
                &regs.intstat1,
                &regs.intmask1,
                &regs.intclr1,
                bit << dma::int1::BTC_POS,
            ),
            Event::TransferError => (
                &regs.intstat0,
                &regs.intmask0,
                &regs.intclr0,
                bit << dma::int0::TRNERR_POS,
            ),
            Event::RequestError => (
                &regs.intstat0,
                &regs.intmask0,
                &regs.intclr0,
                bit << dma::int0::REQERR_POS,
            ),
        }
    }

    /// Channel number within its unit, `0..=7`
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Programs addresses, sizes and address modes.
    ///
    /// Both addresses must be aligned to `width`.
    pub fn init(&mut self, config: &Config) -> Result<(), Error> {
        if !config.width.is_aligned(config.source) || !config.width.is_aligned(config.destination)
        {
            warn!("dma address not aligned to the data width");
            return Err(Error::InvalidParameter);
        }
        if config.block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidParameter);
        }

        let ch = self.ch();
        ch.sar.write(config.source);
        ch.dar.write(config.destination);
        ch.dtctl.write(
            (u32::from(config.block_size) & dma::dtctl::BLKSIZE)
                | (u32::from(config.count) << dma::dtctl::CNT_POS),
        );

        let mut chctl = ((config.source_mode as u32) << dma::chctl::SINC_POS)
            | ((config.destination_mode as u32) << dma::chctl::DINC_POS)
            | ((config.width as u32) << dma::chctl::HSIZE_POS);
        if config.interrupt {
            chctl |= dma::chctl::IE;
        }
        ch.chctl.modify_bits(
            dma::chctl::SINC | dma::chctl::DINC | dma::chctl::HSIZE | dma::chctl::IE,
            chctl,
        );
        Ok(())
    }

    /// Puts the channel back into its reset state and drops its pending events.
    pub fn deinit(&mut self) {
        let regs = self.regs();
        let bit = self.bit();
        regs.chenclr.write(bit);

        let ch = self.ch();
        ch.sar.write(0);
        ch.dar.write(0);

        let errors = (bit << dma::int0::TRNERR_POS) | (bit << dma::int0::REQERR_POS);
        let transfers = (bit << dma::int1::TC_POS) | (bit << dma::int1::BTC_POS);
        critical_section::with(|_| {
            regs.intmask0.clear_bits(errors);
            regs.intmask1.clear_bits(transfers);
        });
        regs.intclr0.write(errors);
        regs.intclr1.write(transfers);

        ch.dtctl.write(dma::dtctl::RESET);
        ch.chctl.write(dma::chctl::RESET);
        ch.rpt.write(0);
        ch.snseqctl.write(0);
        ch.dnseqctl.write(0);
        ch.llp.write(0);
    }

    pub fn set_source_address(&mut self, address: u32) {
        self.ch().sar.write(address);
    }

    pub fn set_destination_address(&mut self, address: u32) {
        self.ch().dar.write(address);
    }

    pub fn set_transfer_count(&mut self, count: u16) {
        self.ch()
            .dtctl
            .modify_bits(dma::dtctl::CNT, u32::from(count) << dma::dtctl::CNT_POS);
    }

    pub fn set_block_size(&mut self, size: u16) -> Result<(), Error> {
        if size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidParameter);
        }
        self.ch()
            .dtctl
            .modify_bits(dma::dtctl::BLKSIZE, u32::from(size));
        Ok(())
    }

    pub fn set_data_width(&mut self, width: DataWidth) {
        self.ch().chctl.modify_bits(
            dma::chctl::HSIZE,
            (width as u32) << dma::chctl::HSIZE_POS,
        );
    }

    pub fn configure_repeat(&mut self, config: &RepeatConfig) -> Result<(), Error> {
        if config.source_size > MAX_REPEAT_SIZE || config.destination_size > MAX_REPEAT_SIZE {
            return Err(Error::InvalidParameter);
        }
        let ch = self.ch();
        ch.chctl.modify_bits(
            dma::chctl::SRPTEN | dma::chctl::DRPTEN,
            config.sides.bits(dma::chctl::SRPTEN, dma::chctl::DRPTEN),
        );
        ch.rpt.write(
            ((u32::from(config.destination_size) << dma::rpt::DRPT_POS)
                | u32::from(config.source_size))
                & (dma::rpt::DRPT | dma::rpt::SRPT),
        );
        Ok(())
    }

    pub fn configure_non_sequence(&mut self, config: &NonSequenceConfig) -> Result<(), Error> {
        if config.source_count > MAX_NON_SEQUENCE_COUNT
            || config.destination_count > MAX_NON_SEQUENCE_COUNT
            || config.source_offset > MAX_NON_SEQUENCE_OFFSET
            || config.destination_offset > MAX_NON_SEQUENCE_OFFSET
        {
            return Err(Error::InvalidParameter);
        }
        let nseq = |count: u16, offset: u32| {
            ((u32::from(count) << dma::nseqctl::CNT_POS) & dma::nseqctl::CNT) | offset
        };
        let ch = self.ch();
        ch.chctl.modify_bits(
            dma::chctl::SNSEQEN | dma::chctl::DNSEQEN,
            config.sides.bits(dma::chctl::SNSEQEN, dma::chctl::DNSEQEN),
        );
        ch.snseqctl
            .write(nseq(config.source_count, config.source_offset));
        ch.dnseqctl
            .write(nseq(config.destination_count, config.destination_offset));
        Ok(())
    }

    pub fn configure_linked_list(&mut self, config: &LinkedListConfig) -> Result<(), Error> {
        if config.address & !dma::llp::LLP != 0 {
            return Err(Error::InvalidParameter);
        }
        let mut chctl = 0;
        if config.enable {
            chctl |= dma::chctl::LLPEN;
        }
        if config.run {
            chctl |= dma::chctl::LLPRUN;
        }
        let ch = self.ch();
        ch.chctl
            .modify_bits(dma::chctl::LLPEN | dma::chctl::LLPRUN, chctl);
        ch.llp.write(config.address);
        Ok(())
    }

    /// Points the channel at the next descriptor, which must be word aligned.
    pub fn set_linked_list_address(&mut self, address: u32) -> Result<(), Error> {
        if address & !dma::llp::LLP != 0 {
            return Err(Error::InvalidParameter);
        }
        self.ch().llp.write(address);
        Ok(())
    }

    pub fn enable_linked_list(&mut self, enable: bool) {
        let chctl = &self.ch().chctl;
        if enable {
            chctl.set_bits(dma::chctl::LLPEN);
        } else {
            chctl.clear_bits(dma::chctl::LLPEN);
        }
    }

    /// Marks the channel's AHB accesses bufferable and cacheable.
    pub fn set_bufferable(&mut self, enable: bool) {
        let chctl = &self.ch().chctl;
        if enable {
            chctl.set_bits(dma::chctl::HPROT);
        } else {
            chctl.clear_bits(dma::chctl::HPROT);
        }
    }

    /// Enables the channel, the first request starts the transfer.
    pub fn start(&mut self) {
        self.regs().chen.write(self.bit());
    }

    pub fn stop(&mut self) {
        self.regs().chenclr.write(self.bit());
    }

    pub fn is_enabled(&self) -> bool {
        self.regs().chen.is_set(self.bit())
    }

    /// Issues a software request to the channel.
    pub fn software_trigger(&mut self) {
        self.regs().swreq.write(dma::swreq::KEY | self.bit());
    }

    /// Returns `true` while the channel is moving data.
    pub fn is_active(&self) -> bool {
        self.regs()
            .chstat
            .is_set(self.bit() << dma::chstat::CHACT_POS)
    }

    /// Returns `true` while a request for the channel is waiting.
    pub fn is_requested(&self) -> bool {
        self.regs().reqstat.is_set(self.bit())
    }

    /// Unmasks `event`. The channel interrupt itself is switched by [`Config::interrupt`].
    pub fn listen(&mut self, event: Event) {
        let (_, mask, _, bit) = self.event_regs(event);
        critical_section::with(|_| mask.clear_bits(bit));
    }

    pub fn unlisten(&mut self, event: Event) {
        let (_, mask, _, bit) = self.event_regs(event);
        critical_section::with(|_| mask.set_bits(bit));
    }

    pub fn is_pending(&self, event: Event) -> bool {
        let (stat, _, _, bit) = self.event_regs(event);
        stat.is_set(bit)
    }

    pub fn clear_pending(&mut self, event: Event) {
        let (_, _, clr, bit) = self.event_regs(event);
        clr.write(bit);
    }

    pub fn current_source_address(&self) -> u32 {
        self.ch().monsar.read()
    }

    pub fn current_destination_address(&self) -> u32 {
        self.ch().mondar.read()
    }

    /// Blocks still to be transferred
    pub fn remaining_count(&self) -> u16 {
        (self.ch().mondtctl.read_bits(dma::dtctl::CNT) >> dma::dtctl::CNT_POS) as u16
    }

    pub fn current_block_size(&self) -> u16 {
        self.ch().mondtctl.read_bits(dma::dtctl::BLKSIZE) as u16
    }
}

#[cfg(feature = "hc32f334")]
impl Channel<DMA1> {
    /// Routes the peripheral event `source` to this channel's request input.
    pub fn set_trigger_source(&mut self, aos: &mut Aos, source: EventSource) -> Result<(), Error> {
        aos.set_trigger_source(Target::Dma(self.index), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pac::PWC;
    use crate::pwc::PwcExt;

    fn channels() -> (Channels<DMA1>, &'static dma::RegisterBlock) {
        let mut pwc = crate::pwc::mock();
        let raw = DMA1::mock();
        let rb = unsafe { &*raw.as_ptr() };
        (raw.split(&mut pwc.fcg0), rb)
    }

    #[test]
    fn split_clocks_and_enables_the_unit() {
        let pwc = PWC::mock();
        let pwc_rb = unsafe { &*pwc.as_ptr() };
        pwc_rb.fcg0.write(0xFFFF_FFFF);
        let mut parts = pwc.constrain();

        let raw = DMA1::mock();
        let rb = unsafe { &*raw.as_ptr() };
        let channels = raw.split(&mut parts.fcg0);

        assert_eq!(pwc_rb.fcg0.read(), !(1 << 14));
        assert_eq!(rb.en.read(), dma::en::EN);
        assert_eq!(channels.0.index(), 0);
        assert_eq!(channels.7.index(), 7);
    }

    #[test]
    fn init_programs_the_channel_window() {
        let (mut channels, rb) = channels();
        let config = Config::default()
            .source(0x2000_0000)
            .destination(0x4000_0004)
            .width(DataWidth::Bits32)
            .block_size(4)
            .count(10)
            .source_mode(AddressMode::Increment)
            .interrupt(true);
        channels.3.init(&config).unwrap();

        let ch = &rb.ch[3];
        assert_eq!(ch.sar.read(), 0x2000_0000);
        assert_eq!(ch.dar.read(), 0x4000_0004);
        assert_eq!(ch.dtctl.read(), 4 | (10 << 16));
        assert_eq!(ch.chctl.read(), dma::chctl::IE | 0b01 | (2 << 8));
        assert_eq!(rb.ch[2].sar.read(), 0);
    }

    #[test]
    fn init_rejects_misaligned_addresses_and_oversized_blocks() {
        let (mut channels, rb) = channels();
        let misaligned = Config::default()
            .source(0x2000_0001)
            .width(DataWidth::Bits16);
        assert_eq!(channels.1.init(&misaligned), Err(Error::InvalidParameter));
        assert_eq!(
            channels.1.init(&Config::default().block_size(1025)),
            Err(Error::InvalidParameter)
        );
        assert_eq!(rb.ch[1].dtctl.read(), 0);

        channels.1.init(&Config::default().block_size(1024)).unwrap();
        assert_eq!(rb.ch[1].dtctl.read(), 0);
        assert_eq!(
            channels.1.set_block_size(MAX_BLOCK_SIZE + 1),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn start_stop_and_trigger_touch_only_the_channel_bit() {
        let (mut channels, rb) = channels();
        channels.5.start();
        assert_eq!(rb.chen.read(), 1 << 5);
        assert!(channels.5.is_enabled());
        assert!(!channels.4.is_enabled());

        channels.5.software_trigger();
        assert_eq!(rb.swreq.read(), 0x00A1_0020);

        channels.5.stop();
        assert_eq!(rb.chenclr.read(), 1 << 5);
    }

    #[test]
    fn events_map_to_their_register_groups() {
        let (mut channels, rb) = channels();
        rb.intmask0.write(0xFFFF_FFFF);
        rb.intmask1.write(0xFFFF_FFFF);

        channels.2.listen(Event::TransferComplete);
        channels.2.listen(Event::BlockComplete);
        assert_eq!(rb.intmask1.read(), !((1 << 2) | (1 << 18)));
        channels.2.listen(Event::RequestError);
        assert_eq!(rb.intmask0.read(), !(1 << 18));
        channels.2.unlisten(Event::TransferComplete);
        assert_eq!(rb.intmask1.read(), !(1 << 18));

        rb.intstat1.write(1 << 18);
        assert!(channels.2.is_pending(Event::BlockComplete));
        assert!(!channels.2.is_pending(Event::TransferComplete));
        assert!(!channels.3.is_pending(Event::BlockComplete));

        channels.2.clear_pending(Event::BlockComplete);
        assert_eq!(rb.intclr1.read(), 1 << 18);
        channels.2.clear_pending(Event::TransferError);
        assert_eq!(rb.intclr0.read(), 1 << 2);
    }

    #[test]
    fn deinit_restores_reset_values() {
        let (mut channels, rb) = channels();
        let ch = &rb.ch[6];
        ch.sar.write(0x1234);
        ch.chctl.write(0xFFFF);
        ch.rpt.write(0x55);
        ch.llp.write(0x2000_0100);
        rb.intmask0.write(0xFFFF_FFFF);
        rb.intmask1.write(0xFFFF_FFFF);

        channels.6.deinit();

        assert_eq!(rb.chenclr.read(), 1 << 6);
        assert_eq!(ch.sar.read(), 0);
        assert_eq!(ch.dtctl.read(), 1);
        assert_eq!(ch.chctl.read(), 0x1000);
        assert_eq!(ch.rpt.read(), 0);
        assert_eq!(ch.llp.read(), 0);
        assert_eq!(rb.intmask0.read(), !((1 << 6) | (1 << 22)));
        assert_eq!(rb.intmask1.read(), !((1 << 6) | (1 << 22)));
        assert_eq!(rb.intclr0.read(), (1 << 6) | (1 << 22));
        assert_eq!(rb.intclr1.read(), (1 << 6) | (1 << 22));
    }

    #[test]
    fn repeat_and_non_sequence_modes() {
        let (mut channels, rb) = channels();
        let repeat = RepeatConfig {
            sides: Sides::Both,
            source_size: 16,
            destination_size: 1024,
        };
        channels.0.configure_repeat(&repeat).unwrap();
        assert_eq!(rb.ch[0].rpt.read(), 16);
        assert_eq!(
            rb.ch[0].chctl.read(),
            dma::chctl::SRPTEN | dma::chctl::DRPTEN
        );
        assert_eq!(
            channels.0.configure_repeat(&RepeatConfig {
                source_size: 1025,
                ..repeat
            }),
            Err(Error::InvalidParameter)
        );

        let nseq = NonSequenceConfig {
            sides: Sides::Destination,
            source_count: 0,
            source_offset: 0,
            destination_count: 3,
            destination_offset: 8,
        };
        channels.0.configure_non_sequence(&nseq).unwrap();
        assert_eq!(rb.ch[0].dnseqctl.read(), (3 << 20) | 8);
        assert_eq!(
            rb.ch[0].chctl.read(),
            dma::chctl::SRPTEN | dma::chctl::DRPTEN | dma::chctl::DNSEQEN
        );
        assert_eq!(
            channels.0.configure_non_sequence(&NonSequenceConfig {
                destination_offset: MAX_NON_SEQUENCE_OFFSET + 1,
                ..nseq
            }),
            Err(Error::InvalidParameter)
        );
    }

    #[test]
    fn linked_list_needs_word_aligned_descriptors() {
        let (mut channels, rb) = channels();
        let config = LinkedListConfig {
            enable: true,
            run: true,
            address: 0x2000_0102,
        };
        assert_eq!(
            channels.4.configure_linked_list(&config),
            Err(Error::InvalidParameter)
        );
        channels
            .4
            .configure_linked_list(&LinkedListConfig {
                address: 0x2000_0100,
                ..config
            })
            .unwrap();
        assert_eq!(rb.ch[4].llp.read(), 0x2000_0100);
        assert_eq!(
            rb.ch[4].chctl.read(),
            dma::chctl::LLPEN | dma::chctl::LLPRUN
        );
        channels.4.enable_linked_list(false);
        assert_eq!(rb.ch[4].chctl.read(), dma::chctl::LLPRUN);
    }

    #[test]
    fn monitor_registers_report_progress() {
        let (channels, rb) = channels();
        rb.ch[1].mondtctl.write((7 << 16) | 3);
        rb.ch[1].monsar.write(0x2000_0010);
        rb.chstat.write(1 << 17);
        assert_eq!(channels.1.remaining_count(), 7);
        assert_eq!(channels.1.current_block_size(), 3);
        assert_eq!(channels.1.current_source_address(), 0x2000_0010);
        assert!(channels.1.is_active());
        assert!(!channels.0.is_active());
    }

    #[cfg(feature = "hc32f334")]
    #[test]
    fn trigger_source_goes_through_the_aos() {
        use crate::aos::AosExt;
        use crate::pac::AOS;

        let mut pwc = crate::pwc::mock();
        let raw = AOS::mock();
        let aos_rb = unsafe { &*raw.as_ptr() };
        let mut aos = raw.constrain(&mut pwc.fcg0);

        let (mut channels, _) = channels();
        channels
            .4
            .set_trigger_source(&mut aos, EventSource::SOFTWARE)
            .unwrap();
        assert_eq!(aos_rb.dma_trgsel[4].read(), 0x1FF);
    }
}
