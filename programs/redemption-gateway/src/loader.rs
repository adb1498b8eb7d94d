//! Zero-copy loader for gateway-owned accounts.
//!
//! [`AccountLoader`] checks owner, size and discriminator once at
//! construction; afterwards data is reached through closures so that every
//! borrow is dropped before the next CPI.

use core::marker::PhantomData;

use bytemuck::Pod;
use pinocchio::{
    account_info::{AccountInfo, Ref, RefMut},
    program_error::ProgramError,
    pubkey::Pubkey,
};

use crate::errors::GatewayError;

/// Length of the account discriminator prefix.
pub const DISCRIMINATOR_LEN: usize = 8;

/// A Pod account type stored by this program behind an 8-byte discriminator.
pub trait ProgramAccount: Pod {
    /// Discriminator written in the first 8 bytes (little-endian).
    const DISCRIMINATOR: u64;

    /// Body size.
    const SIZE: usize = core::mem::size_of::<Self>();

    /// Discriminator plus body.
    const INIT_SPACE: usize = DISCRIMINATOR_LEN + Self::SIZE;
}

/// Validated handle to a program-owned account of type `T`.
#[repr(transparent)]
pub struct AccountLoader<'info, T: ProgramAccount> {
    info: &'info AccountInfo,
    _marker: PhantomData<T>,
}

impl<'info, T: ProgramAccount> AccountLoader<'info, T> {
    /// Validate owner, minimum size and discriminator.
    ///
    /// # Errors
    /// [`GatewayError::InvalidGatewayConfig`] if any check fails.
    pub fn new(info: &'info AccountInfo) -> Result<Self, ProgramError> {
        if info.owner() != &crate::ID {
            return Err(GatewayError::InvalidGatewayConfig.into());
        }

        let data = info.try_borrow_data()?;
        if data.len() < T::INIT_SPACE || read_discriminator(&data) != Some(T::DISCRIMINATOR) {
            return Err(GatewayError::InvalidGatewayConfig.into());
        }
        drop(data);

        Ok(Self {
            info,
            _marker: PhantomData,
        })
    }

    /// Write the discriminator and `value` into a freshly allocated account.
    ///
    /// The account must already be owned by this program with at least
    /// `T::INIT_SPACE` bytes.
    pub fn init(info: &'info AccountInfo, value: &T) -> Result<Self, ProgramError> {
        {
            let mut data = info.try_borrow_mut_data()?;
            if data.len() < T::INIT_SPACE {
                return Err(ProgramError::AccountDataTooSmall);
            }
            data[..DISCRIMINATOR_LEN].copy_from_slice(&T::DISCRIMINATOR.to_le_bytes());
            data[DISCRIMINATOR_LEN..T::INIT_SPACE].copy_from_slice(bytemuck::bytes_of(value));
        }
        Self::new(info)
    }

    /// Account address.
    #[inline(always)]
    pub fn key(&self) -> &'info Pubkey {
        self.info.key()
    }

    /// Underlying account, for CPIs.
    #[inline(always)]
    pub fn account_info(&self) -> &'info AccountInfo {
        self.info
    }

    fn load(&self) -> Result<Ref<'info, T>, ProgramError> {
        let data = self.info.try_borrow_data()?;
        Ok(Ref::map(data, |bytes: &[u8]| {
            bytemuck::from_bytes(&bytes[DISCRIMINATOR_LEN..T::INIT_SPACE])
        }))
    }

    fn load_mut(&self) -> Result<RefMut<'info, T>, ProgramError> {
        let data = self.info.try_borrow_mut_data()?;
        Ok(RefMut::map(data, |bytes: &mut [u8]| {
            bytemuck::from_bytes_mut(&mut bytes[DISCRIMINATOR_LEN..T::INIT_SPACE])
        }))
    }

    /// Read account data through an infallible closure.
    #[inline]
    pub fn map<F, R>(&self, f: F) -> Result<R, ProgramError>
    where
        F: FnOnce(&T) -> R,
    {
        let account = self.load()?;
        Ok(f(&account))
    }

    /// Read account data through a fallible closure.
    #[inline]
    pub fn try_map<F, R>(&self, f: F) -> Result<R, ProgramError>
    where
        F: FnOnce(&T) -> Result<R, ProgramError>,
    {
        let account = self.load()?;
        f(&account)
    }

    /// Modify account data through a fallible closure.
    #[inline]
    pub fn try_inspect_mut<F>(&self, f: F) -> Result<(), ProgramError>
    where
        F: FnOnce(&mut T) -> Result<(), ProgramError>,
    {
        let mut account = self.load_mut()?;
        f(&mut account)
    }

    /// Modify account data through a fallible closure, returning a value.
    #[inline]
    pub fn try_map_mut<F, R>(&self, f: F) -> Result<R, ProgramError>
    where
        F: FnOnce(&mut T) -> Result<R, ProgramError>,
    {
        let mut account = self.load_mut()?;
        f(&mut account)
    }
}

/// Discriminator of raw account data, `None` if shorter than 8 bytes.
#[inline]
pub fn read_discriminator(data: &[u8]) -> Option<u64> {
    let bytes: [u8; DISCRIMINATOR_LEN] = data.get(..DISCRIMINATOR_LEN)?.try_into().ok()?;
    Some(u64::from_le_bytes(bytes))
}
