//! Surface definition-line parser.
//!
//! One directive per line: `<signed-id> <type-keyword> <param> <param> ...`.
//! Keywords follow the usual particle-transport conventions:
//!
//! | keyword | parameters | surface |
//! |---------|------------|---------|
//! | `p`     | `a b c d`  | plane `ax + by + cz = d` |
//! | `px` `py` `pz` | `d` | axis-normal plane |
//! | `s`     | `x y z r`  | sphere |
//! | `so`    | `r`        | sphere at the origin |
//! | `cx` `cy` `cz` | `r` | infinite axis cylinder through the origin |
//! | `k`     | `px py pz ax ay az deg` | double cone: apex, axis, half-angle in degrees |
//! | `gq`    | `a b c d e f g h j k` | general quadric |

use crate::error::SurfaceError;
use crate::{Cone, Cylinder, Plane, Quadric, Shape, Sphere, Surface};
use raycell_math::{Point3, Vec3};

impl Shape {
    /// Build a shape from a type keyword and its numeric parameters.
    pub fn from_definition(keyword: &str, params: &[f64]) -> Result<Self, SurfaceError> {
        let shape = match keyword {
            "p" => {
                expect_arity(keyword, params, 4)?;
                Shape::Plane(Plane::new(
                    Vec3::new(params[0], params[1], params[2]),
                    params[3],
                )?)
            }
            "px" => {
                expect_arity(keyword, params, 1)?;
                Shape::Plane(Plane::x_at(params[0]))
            }
            "py" => {
                expect_arity(keyword, params, 1)?;
                Shape::Plane(Plane::y_at(params[0]))
            }
            "pz" => {
                expect_arity(keyword, params, 1)?;
                Shape::Plane(Plane::z_at(params[0]))
            }
            "s" => {
                expect_arity(keyword, params, 4)?;
                Shape::Sphere(Sphere::new(
                    Point3::new(params[0], params[1], params[2]),
                    params[3],
                )?)
            }
            "so" => {
                expect_arity(keyword, params, 1)?;
                Shape::Sphere(Sphere::at_origin(params[0])?)
            }
            "cx" => {
                expect_arity(keyword, params, 1)?;
                Shape::Cylinder(Cylinder::along_x(params[0])?)
            }
            "cy" => {
                expect_arity(keyword, params, 1)?;
                Shape::Cylinder(Cylinder::along_y(params[0])?)
            }
            "cz" => {
                expect_arity(keyword, params, 1)?;
                Shape::Cylinder(Cylinder::along_z(params[0])?)
            }
            "k" => {
                expect_arity(keyword, params, 7)?;
                Shape::Cone(Cone::new(
                    Point3::new(params[0], params[1], params[2]),
                    Vec3::new(params[3], params[4], params[5]),
                    params[6].to_radians(),
                )?)
            }
            "gq" => {
                expect_arity(keyword, params, 10)?;
                let mut coeffs = [0.0; 10];
                coeffs.copy_from_slice(params);
                Shape::Quadric(Quadric::new(coeffs)?)
            }
            other => return Err(SurfaceError::UnknownKeyword(other.to_string())),
        };
        Ok(shape)
    }
}

impl Surface {
    /// Parse a single definition line into a surface.
    pub fn parse(line: &str) -> Result<Self, SurfaceError> {
        let mut tokens = line.split_whitespace();
        let id_token = tokens.next().ok_or(SurfaceError::Empty)?;
        let id: i32 = id_token
            .parse()
            .map_err(|_| SurfaceError::BadId(id_token.to_string()))?;

        let keyword = tokens.next().ok_or(SurfaceError::MissingKeyword)?;
        let params = tokens
            .map(|t| t.parse().map_err(|_| SurfaceError::BadNumber(t.to_string())))
            .collect::<Result<Vec<f64>, _>>()?;

        let shape = Shape::from_definition(keyword, &params)?;
        Ok(Surface::new(id, shape))
    }
}

fn expect_arity(keyword: &str, params: &[f64], expected: usize) -> Result<(), SurfaceError> {
    if params.len() != expected {
        return Err(SurfaceError::WrongArity {
            keyword: keyword.to_string(),
            expected,
            got: params.len(),
        });
    }
    Ok(())
}
