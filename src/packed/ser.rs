//! Serde Serializer for Solidity's non-standard packed mode
//! (`abi.encodePacked`, `soliditySHA3` in ethereumjs-abi).
//!
//! Unlike the regular ABI encoding nothing is padded to 32 byte slots: every
//! value is written at its natural width and fields are simply concatenated.
//! This is only unambiguous because every payload we hash has a fixed layout
//! known to both sides, so dynamic types are limited to a single trailing
//! string or bytes value (see [Error::TypeNotYetSupported] for sequences).

use alloc::vec::Vec;

use super::error::{Error, Result};
use serde::{
    ser::{self, Impossible, SerializeStruct, SerializeTuple, SerializeTupleStruct},
    Serialize,
};

pub trait Writer {
    fn write(&mut self, bytes: &[u8]);
}

impl Writer for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

pub struct Serializer<'a, W>
where
    W: Writer,
{
    writer: &'a mut W,
}

pub fn to_writer<T, W>(value: &T, writer: &mut W) -> Result<()>
where
    T: Serialize + ?Sized,
    W: Writer,
{
    let mut serializer = Serializer { writer };
    value.serialize(&mut serializer)
}

pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: Serialize + ?Sized,
{
    let mut buf = Vec::new();
    to_writer(value, &mut buf)?;
    Ok(buf)
}

impl<'a, 'w, W> ser::Serializer for &'a mut Serializer<'w, W>
where
    W: Writer,
{
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Self;
    type SerializeTupleStruct = Self;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Impossible<(), Error>;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.writer.write(&[v as u8]);
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.writer.write(&[v]);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<()> {
        self.writer.write(&v.to_be_bytes());
        Ok(())
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::TypeNotRepresentable("f32"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::TypeNotRepresentable("f64"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(Error::TypeNotYetSupported("char"))
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.writer.write(v.as_bytes());
        Ok(())
    }

    // Fixed-size types (Address, Hash, U256) end up here as well, which is
    // why their width must already be the packed width.
    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        self.writer.write(v);
        Ok(())
    }

    fn serialize_none(self) -> Result<()> {
        Err(Error::TypeNotRepresentable("Option"))
    }

    fn serialize_some<T: ?Sized>(self, _value: &T) -> Result<()>
    where
        T: Serialize,
    {
        Err(Error::TypeNotRepresentable("Option"))
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Error::TypeNotRepresentable("enum"))
    }

    fn serialize_newtype_struct<T: ?Sized>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: Serialize,
    {
        Err(Error::TypeNotRepresentable("enum"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Error::TypeNotYetSupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Ok(self)
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(self)
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Error::TypeNotRepresentable("enum"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(Error::TypeNotRepresentable("map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Error::TypeNotRepresentable("enum"))
    }

    // serde only provides this one with its `std` or `alloc` feature.
    fn collect_str<T>(self, _value: &T) -> Result<()>
    where
        T: ?Sized + core::fmt::Display,
    {
        Err(Error::TypeNotYetSupported("collect_str"))
    }

    fn is_human_readable(&self) -> bool {
        false
    }
}

impl<'a, 'w, W> SerializeTuple for &'a mut Serializer<'w, W>
where
    W: Writer,
{
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w, W> SerializeTupleStruct for &'a mut Serializer<'w, W>
where
    W: Writer,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a, 'w, W> SerializeStruct for &'a mut Serializer<'w, W>
where
    W: Writer,
{
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized>(&mut self, _key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        value.serialize(&mut **self)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}
